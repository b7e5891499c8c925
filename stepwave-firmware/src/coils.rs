//! Board coil outputs
//!
//! Embassy tasks cannot be generic, so the concrete driver selected by
//! `machine.toml` is wrapped in one enum that the motor task owns.
//!
//! Pin assignments (Raspberry Pi Pico):
//! - Wave drive: GPIO2-5 to IN1-IN4 of a ULN2003 board
//! - Bipolar: GPIO6/7 (PWM3 A/B) to AIN1/AIN2, GPIO8/9 (PWM4 A/B) to
//!   BIN1/BIN2 of a DRV8833

use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;
use stepwave_core::traits::{CoilDriver, DriveError};
use stepwave_drivers::coil::{HBridgeChannel, HBridgeDriver, WaveDriver};

/// PWM counter top for ~20 kHz at the default 125 MHz system clock
pub const PWM_TOP: u16 = 6_249;

/// One coil on a pair of PWM outputs
pub type PwmChannel = HBridgeChannel<PwmOutput<'static>, PwmOutput<'static>>;

/// Coil outputs in use on this board
pub enum BoardCoils {
    /// Four discrete outputs
    Wave(WaveDriver<Output<'static>, 4>),
    /// Two H-bridge channels
    Bipolar(HBridgeDriver<PwmChannel, PwmChannel>),
}

impl CoilDriver for BoardCoils {
    fn set_analog(&mut self, coil: u8, level: f32) -> Result<(), DriveError> {
        match self {
            BoardCoils::Wave(d) => d.set_analog(coil, level),
            BoardCoils::Bipolar(d) => d.set_analog(coil, level),
        }
    }

    fn set_discrete(&mut self, pin: u8, energized: bool) -> Result<(), DriveError> {
        match self {
            BoardCoils::Wave(d) => d.set_discrete(pin, energized),
            BoardCoils::Bipolar(d) => d.set_discrete(pin, energized),
        }
    }
}
