//! Wave-drive coil outputs
//!
//! Drives a unipolar stepper through one GPIO per coil end, typically via a
//! Darlington array or MOSFET board. Pin slot `n` of the phase table maps to
//! the `n`th pin given at construction. Outputs can be active-low for boards
//! that sink current on a low level.

use embedded_hal::digital::{OutputPin, PinState};
use stepwave_core::traits::{CoilDriver, DriveError};

/// Discrete wave-drive outputs
pub struct WaveDriver<P, const N: usize> {
    pins: [P; N],
    /// If true, energized = pin LOW
    inverted: bool,
}

impl<P: OutputPin, const N: usize> WaveDriver<P, N> {
    /// Create a new wave driver
    ///
    /// Pins are not touched until the first call; the sequencer's
    /// `all_off` puts them in a known state.
    ///
    /// # Arguments
    /// - `pins`: Output pins in slot order
    /// - `inverted`: If true, a coil is energized when its pin is LOW
    pub fn new(pins: [P; N], inverted: bool) -> Self {
        Self { pins, inverted }
    }

    /// Create a wave driver with active-high outputs
    pub fn new_active_high(pins: [P; N]) -> Self {
        Self::new(pins, false)
    }

    /// Consume the driver and return the pins
    pub fn release(self) -> [P; N] {
        self.pins
    }
}

impl<P: OutputPin, const N: usize> CoilDriver for WaveDriver<P, N> {
    fn set_analog(&mut self, _coil: u8, _level: f32) -> Result<(), DriveError> {
        Err(DriveError::Unsupported)
    }

    fn set_discrete(&mut self, pin: u8, energized: bool) -> Result<(), DriveError> {
        let output = self
            .pins
            .get_mut(pin as usize)
            .ok_or(DriveError::InvalidChannel)?;

        // Normal: energized=true, inverted=false → high
        // Inverted: energized=true, inverted=true → low
        let state = PinState::from(energized != self.inverted);
        output.set_state(state).map_err(|_| DriveError::Bus)
    }
}
