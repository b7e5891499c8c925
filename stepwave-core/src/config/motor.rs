//! Motor configuration
//!
//! Everything needed to build a sequencer for one motor: drive mode, wave
//! pin order, step timing and step angle. With the `serde` feature the
//! configuration can be stored as a postcard blob.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sequence::{
    PhaseTable, TableError, DEFAULT_DEGREES_PER_STEP, DEFAULT_STEP_DELAY_US, DEFAULT_WAVE_ORDER,
};
use crate::traits::WAVE_PIN_COUNT;

/// Maximum encoded size of a [`MotorConfig`] in bytes
pub const MAX_CONFIG_SIZE: usize = 32;

/// How the motor coils are driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DriveMode {
    /// Two coils with signed analog levels (H-bridge board)
    #[default]
    Bipolar,
    /// Four discrete coil pins, wave drive with overlap
    Wave,
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Degrees per step must be finite and positive
    InvalidDegreesPerStep,
    /// Wave order must name each pin slot exactly once
    InvalidWaveOrder,
    /// Phase table could not be built
    Table(TableError),
    /// Serialization failed (buffer too small)
    Encode,
    /// Deserialization failed
    Decode,
}

impl From<TableError> for ConfigError {
    fn from(e: TableError) -> Self {
        ConfigError::Table(e)
    }
}

/// Configuration for one stepper motor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorConfig {
    /// Coil drive mode
    pub mode: DriveMode,
    /// Order in which wave-drive pin slots are energized (wave mode only)
    pub wave_order: [u8; 4],
    /// Delay between unit steps in microseconds
    pub step_delay_us: u32,
    /// Step angle in degrees (1.8 for a 200-step motor)
    pub degrees_per_step: f32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            mode: DriveMode::Bipolar,
            wave_order: DEFAULT_WAVE_ORDER,
            step_delay_us: DEFAULT_STEP_DELAY_US,
            degrees_per_step: DEFAULT_DEGREES_PER_STEP,
        }
    }
}

impl MotorConfig {
    /// Default wave-drive configuration
    pub fn wave() -> Self {
        Self {
            mode: DriveMode::Wave,
            ..Self::default()
        }
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.degrees_per_step.is_finite() || self.degrees_per_step <= 0.0 {
            return Err(ConfigError::InvalidDegreesPerStep);
        }

        if self.mode == DriveMode::Wave {
            let mut seen = [false; WAVE_PIN_COUNT as usize];
            for &pin in &self.wave_order {
                let slot = seen
                    .get_mut(pin as usize)
                    .ok_or(ConfigError::InvalidWaveOrder)?;
                if *slot {
                    return Err(ConfigError::InvalidWaveOrder);
                }
                *slot = true;
            }
        }

        Ok(())
    }

    /// Build the phase table for this configuration
    pub fn phase_table(&self) -> Result<PhaseTable, ConfigError> {
        self.validate()?;
        match self.mode {
            DriveMode::Bipolar => Ok(PhaseTable::bipolar_full_step()),
            DriveMode::Wave => Ok(PhaseTable::wave(self.wave_order)?),
        }
    }

    /// Serialize into `buf` as postcard, returning the used part
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Deserialize from postcard bytes and validate
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }
}
