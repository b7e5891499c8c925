//! Mock driver and delay shared by the sequencer unit tests

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::traits::{CoilDriver, DriveError, WAVE_PIN_COUNT};

/// One recorded driver call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Analog(u8, f32),
    Discrete(u8, bool),
}

/// Driver that records successful calls and can inject bus faults
pub struct RecordingDriver {
    pub calls: Vec<Call, 128>,
    /// Total calls attempted, including failed ones
    pub attempts: usize,
    /// Fail every call from this attempt index onward
    pub fail_after: Option<usize>,
    /// Fail only the call at this attempt index
    pub fail_only: Option<usize>,
    pins: [bool; WAVE_PIN_COUNT as usize],
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            attempts: 0,
            fail_after: None,
            fail_only: None,
            pins: [false; WAVE_PIN_COUNT as usize],
        }
    }

    /// Current state of the discrete pins
    pub fn energized(&self) -> [bool; WAVE_PIN_COUNT as usize] {
        self.pins
    }

    fn record(&mut self, call: Call) -> Result<(), DriveError> {
        let attempt = self.attempts;
        self.attempts += 1;

        let failing = self.fail_after.is_some_and(|n| attempt >= n) || self.fail_only == Some(attempt);
        if failing {
            return Err(DriveError::Bus);
        }

        // Long walks overflow the log; only the first calls are kept
        let _ = self.calls.push(call);
        Ok(())
    }
}

impl CoilDriver for RecordingDriver {
    fn set_analog(&mut self, coil: u8, level: f32) -> Result<(), DriveError> {
        self.record(Call::Analog(coil, level))
    }

    fn set_discrete(&mut self, pin: u8, energized: bool) -> Result<(), DriveError> {
        self.record(Call::Discrete(pin, energized))?;
        self.pins[pin as usize] = energized;
        Ok(())
    }
}

/// Delay that only counts how often and how long it was asked to wait
pub struct CountingDelay {
    pub sleeps: u32,
    pub total_us: u64,
}

impl CountingDelay {
    pub fn new() -> Self {
        Self {
            sleeps: 0,
            total_us: 0,
        }
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.sleeps += 1;
        self.total_us += u64::from(ns / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.sleeps += 1;
        self.total_us += u64::from(us);
    }
}
