//! Bipolar coil outputs over PWM H-bridges
//!
//! Each coil of a bipolar stepper is wired across one H-bridge channel with
//! two PWM inputs (DRV8833 / TB6612 in PWM-PWM mode, or an L298N with its
//! enable pins tied high). Levels use sign-magnitude mapping:
//!
//! | Level   | IN1            | IN2            |
//! |---------|----------------|----------------|
//! | `> 0`   | `level * max`  | off            |
//! | `< 0`   | off            | `-level * max` |
//! | `0`     | off            | off (coast)    |
//!
//! ```ignore
//! let coil_a = HBridgeChannel::new(pwm_a1, pwm_a2);
//! let coil_b = HBridgeChannel::new(pwm_b1, pwm_b2);
//! let driver = HBridgeDriver::new(coil_a, coil_b);
//! ```

use embedded_hal::pwm::SetDutyCycle;
use stepwave_core::traits::{CoilDriver, DriveError};

/// One H-bridge channel driving one coil
pub struct HBridgeChannel<P1, P2> {
    in1: P1,
    in2: P2,
    /// Last level applied
    level: f32,
}

impl<P1: SetDutyCycle, P2: SetDutyCycle> HBridgeChannel<P1, P2> {
    /// Create a new channel from its two PWM inputs
    pub fn new(in1: P1, in2: P2) -> Self {
        Self {
            in1,
            in2,
            level: 0.0,
        }
    }

    /// Last level applied to this channel
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Drive the coil at a signed level in [-1.0, 1.0]
    pub fn set_level(&mut self, level: f32) -> Result<(), DriveError> {
        if !(-1.0..=1.0).contains(&level) {
            return Err(DriveError::LevelOutOfRange);
        }

        // Release the opposite side first so both inputs are never driven
        if level > 0.0 {
            self.in2.set_duty_cycle_fully_off().map_err(|_| DriveError::Bus)?;
            let duty = scale_duty(level, self.in1.max_duty_cycle());
            self.in1.set_duty_cycle(duty).map_err(|_| DriveError::Bus)?;
        } else if level < 0.0 {
            self.in1.set_duty_cycle_fully_off().map_err(|_| DriveError::Bus)?;
            let duty = scale_duty(-level, self.in2.max_duty_cycle());
            self.in2.set_duty_cycle(duty).map_err(|_| DriveError::Bus)?;
        } else {
            self.in1.set_duty_cycle_fully_off().map_err(|_| DriveError::Bus)?;
            self.in2.set_duty_cycle_fully_off().map_err(|_| DriveError::Bus)?;
        }

        self.level = level;
        Ok(())
    }

    /// Consume the channel and return its PWM inputs
    pub fn release(self) -> (P1, P2) {
        (self.in1, self.in2)
    }
}

/// Scale a magnitude in [0.0, 1.0] to a duty cycle
fn scale_duty(magnitude: f32, max: u16) -> u16 {
    let duty = magnitude * max as f32 + 0.5;
    if duty >= max as f32 {
        max
    } else {
        duty as u16
    }
}

/// Two-coil bipolar driver
///
/// Coil 0 is channel A and coil 1 is channel B.
pub struct HBridgeDriver<A, B> {
    coil_a: A,
    coil_b: B,
}

impl<A1, A2, B1, B2> HBridgeDriver<HBridgeChannel<A1, A2>, HBridgeChannel<B1, B2>>
where
    A1: SetDutyCycle,
    A2: SetDutyCycle,
    B1: SetDutyCycle,
    B2: SetDutyCycle,
{
    /// Create a new driver from two channels
    pub fn new(coil_a: HBridgeChannel<A1, A2>, coil_b: HBridgeChannel<B1, B2>) -> Self {
        Self { coil_a, coil_b }
    }

    /// Borrow coil channel A
    pub fn coil_a(&self) -> &HBridgeChannel<A1, A2> {
        &self.coil_a
    }

    /// Borrow coil channel B
    pub fn coil_b(&self) -> &HBridgeChannel<B1, B2> {
        &self.coil_b
    }

    /// Consume the driver and return both channels
    pub fn release(self) -> (HBridgeChannel<A1, A2>, HBridgeChannel<B1, B2>) {
        (self.coil_a, self.coil_b)
    }
}

impl<A1, A2, B1, B2> CoilDriver for HBridgeDriver<HBridgeChannel<A1, A2>, HBridgeChannel<B1, B2>>
where
    A1: SetDutyCycle,
    A2: SetDutyCycle,
    B1: SetDutyCycle,
    B2: SetDutyCycle,
{
    fn set_analog(&mut self, coil: u8, level: f32) -> Result<(), DriveError> {
        match coil {
            0 => self.coil_a.set_level(level),
            1 => self.coil_b.set_level(level),
            _ => Err(DriveError::InvalidChannel),
        }
    }

    fn set_discrete(&mut self, _pin: u8, _energized: bool) -> Result<(), DriveError> {
        Err(DriveError::Unsupported)
    }
}
