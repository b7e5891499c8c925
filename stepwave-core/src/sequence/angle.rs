//! Angle to step conversion
//!
//! Maps a requested angular displacement onto a signed unit-step count with
//! a fixed degrees-per-step constant. Holds no motion state of its own.

use embedded_hal::delay::DelayNs;

use super::sequencer::Sequencer;
use crate::config::ConfigError;
use crate::traits::{CoilDriver, DriveError};

/// Degrees per full step on a standard 200-step motor
pub const DEFAULT_DEGREES_PER_STEP: f32 = 1.8;

/// Converts angles in degrees into unit steps
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngleConverter {
    degrees_per_step: f32,
}

impl Default for AngleConverter {
    fn default() -> Self {
        Self {
            degrees_per_step: DEFAULT_DEGREES_PER_STEP,
        }
    }
}

impl AngleConverter {
    /// Create a converter for the given step angle
    ///
    /// The step angle must be finite and positive; anything else would turn
    /// small angles into saturated step counts.
    pub fn new(degrees_per_step: f32) -> Result<Self, ConfigError> {
        if !degrees_per_step.is_finite() || degrees_per_step <= 0.0 {
            return Err(ConfigError::InvalidDegreesPerStep);
        }
        Ok(Self { degrees_per_step })
    }

    /// Step angle in degrees
    pub fn degrees_per_step(&self) -> f32 {
        self.degrees_per_step
    }

    /// Number of unit steps for `angle`, truncated toward zero
    ///
    /// Results beyond the `i32` range saturate and NaN yields zero.
    pub fn steps_for(&self, angle: f32) -> i32 {
        (angle / self.degrees_per_step) as i32
    }

    /// Rotate the motor by `angle` degrees
    pub fn move_degrees<D: CoilDriver, T: DelayNs>(
        &self,
        sequencer: &mut Sequencer<D, T>,
        angle: f32,
    ) -> Result<(), DriveError> {
        sequencer.move_steps(self.steps_for(angle))
    }
}
