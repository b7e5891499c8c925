//! Phase sequencing
//!
//! - [`phase`]: phase states and the wrap-around phase table
//! - [`sequencer`]: phase cursor and unit-step walk
//! - [`angle`]: degrees to unit-step conversion

pub mod angle;
pub mod phase;
pub mod sequencer;

#[cfg(test)]
pub(crate) mod test_support;

pub use angle::{AngleConverter, DEFAULT_DEGREES_PER_STEP};
pub use phase::{
    PhaseKind, PhaseState, PhaseTable, TableError, BIPOLAR_FULL_STEP, DEFAULT_WAVE_ORDER,
    MAX_PHASES, MIN_PHASES,
};
pub use sequencer::{Sequencer, DEFAULT_STEP_DELAY_US};
