//! Board-agnostic core logic for the Stepwave stepper sequencer
//!
//! This crate contains all motor logic that does not depend on
//! specific hardware implementations:
//!
//! - Coil driver trait (analog H-bridge levels, discrete wave pins)
//! - Phase table and phase sequencer
//! - Angle to step conversion
//! - Motor configuration
//! - Console session handling

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod sequence;
pub mod session;
pub mod traits;

pub use sequence::{AngleConverter, PhaseState, PhaseTable, Sequencer};
pub use session::Session;
pub use traits::{CoilDriver, DriveError};
