//! Coil driver trait
//!
//! The sequencer never talks to hardware directly. It drives coils through
//! this capability interface, which abstracts over H-bridge boards (signed
//! analog level per coil) and plain GPIO wave drivers (one pin per coil end).

use core::fmt;

/// Number of analog coil channels on a bipolar (two-coil) driver
pub const ANALOG_COIL_COUNT: u8 = 2;

/// Number of discrete pins on a four-phase wave driver
pub const WAVE_PIN_COUNT: u8 = 4;

/// Errors reported by a coil driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveError {
    /// Driver hardware is not present or not responding
    NotPresent,
    /// Bus or pin write failed
    Bus,
    /// Coil or pin index outside what the driver provides
    InvalidChannel,
    /// Analog level outside [-1.0, 1.0] or not a number
    LevelOutOfRange,
    /// Driver does not support this kind of output
    Unsupported,
}

impl DriveError {
    /// Short lowercase description, suitable for console replies
    pub fn as_str(self) -> &'static str {
        match self {
            DriveError::NotPresent => "driver not present",
            DriveError::Bus => "bus fault",
            DriveError::InvalidChannel => "invalid channel",
            DriveError::LevelOutOfRange => "level out of range",
            DriveError::Unsupported => "unsupported output",
        }
    }
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for stepper coil drivers
///
/// A driver typically supports only one of the two output kinds and returns
/// [`DriveError::Unsupported`] for the other.
pub trait CoilDriver {
    /// Set the signed drive level of an analog coil channel
    ///
    /// `level` is in [-1.0, 1.0]; the sign selects current direction and
    /// 0.0 leaves the coil unpowered.
    fn set_analog(&mut self, coil: u8, level: f32) -> Result<(), DriveError>;

    /// Energize or release a discrete coil pin
    fn set_discrete(&mut self, pin: u8, energized: bool) -> Result<(), DriveError>;
}

impl<T: CoilDriver + ?Sized> CoilDriver for &mut T {
    fn set_analog(&mut self, coil: u8, level: f32) -> Result<(), DriveError> {
        (**self).set_analog(coil, level)
    }

    fn set_discrete(&mut self, pin: u8, energized: bool) -> Result<(), DriveError> {
        (**self).set_discrete(pin, energized)
    }
}
