//! Hardware abstraction traits
//!
//! These traits define the interface between the phase sequencer
//! and hardware-specific coil drivers.

pub mod coil;

pub use coil::{CoilDriver, DriveError, ANALOG_COIL_COUNT, WAVE_PIN_COUNT};
