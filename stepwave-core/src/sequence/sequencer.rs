//! Phase cursor and step sequencer
//!
//! The sequencer owns the phase table, the coil driver, a blocking delay
//! provider and the phase cursor. Each unit step advances the cursor by one
//! position, applies the resulting phase to the driver and then waits the
//! fixed step delay.
//!
//! # Cursor
//!
//! The cursor is `None` while the motor is idle (after construction or
//! [`Sequencer::all_off`]). The first unit step from idle seats the coils on
//! the last phase of the table and then applies phase 0, so it produces two
//! applies but only one delay. The cursor persists across calls, so
//! consecutive moves continue from the last physical phase.
//!
//! # Wave drive overlap
//!
//! For discrete tables, applying the phase at cursor `c` first releases the
//! pin two positions behind (`c - 2 mod N`) and then energizes the pin at
//! `c`. The pin one position behind stays energized, giving one step of
//! two-coil overlap.
//!
//! ```ignore
//! let mut seq = Sequencer::new(PhaseTable::bipolar_full_step(), 2000, driver, delay);
//! seq.all_off()?;
//! seq.move_steps(200)?;  // one revolution on a 1.8° motor
//! seq.move_steps(-50)?;  // back a quarter turn
//! seq.all_off()?;
//! ```

use embedded_hal::delay::DelayNs;

use super::phase::{PhaseState, PhaseTable};
use crate::config::{ConfigError, MotorConfig};
use crate::traits::{CoilDriver, DriveError};

/// Default delay between unit steps in microseconds
pub const DEFAULT_STEP_DELAY_US: u32 = 2_000;

/// Stepper phase sequencer
pub struct Sequencer<D, T> {
    table: PhaseTable,
    driver: D,
    delay: T,
    step_delay_us: u32,
    cursor: Option<usize>,
}

impl<D: CoilDriver, T: DelayNs> Sequencer<D, T> {
    /// Create a new sequencer with the cursor idle
    ///
    /// No driver calls are made; call [`Sequencer::all_off`] to put the
    /// outputs in a known state.
    pub fn new(table: PhaseTable, step_delay_us: u32, driver: D, delay: T) -> Self {
        Self {
            table,
            driver,
            delay,
            step_delay_us,
            cursor: None,
        }
    }

    /// Create a sequencer from a motor configuration
    pub fn from_config(config: &MotorConfig, driver: D, delay: T) -> Result<Self, ConfigError> {
        let table = config.phase_table()?;
        Ok(Self::new(table, config.step_delay_us, driver, delay))
    }

    /// Current cursor position, `None` while idle
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Check if the cursor is idle (no holding torque guaranteed)
    pub fn is_idle(&self) -> bool {
        self.cursor.is_none()
    }

    /// Phase table driven by this sequencer
    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    /// Delay between unit steps in microseconds
    pub fn step_delay_us(&self) -> u32 {
        self.step_delay_us
    }

    /// Borrow the coil driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    #[cfg(test)]
    pub(crate) fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Move by a signed number of unit steps
    ///
    /// Positive counts walk the table forward, negative counts walk it
    /// backward and zero does nothing. A driver error aborts the move; the
    /// cursor is left on the last phase that was applied successfully.
    pub fn move_steps(&mut self, count: i32) -> Result<(), DriveError> {
        if count == 0 {
            return Ok(());
        }

        let direction: i8 = if count < 0 { -1 } else { 1 };
        let mut remaining = count.unsigned_abs();

        while remaining > 0 {
            let next = match self.cursor {
                Some(current) => self.table.advance(current, direction),
                None => {
                    self.seat()?;
                    0
                }
            };

            self.apply(next)?;
            self.cursor = Some(next);
            self.delay.delay_us(self.step_delay_us);
            remaining -= 1;
        }

        Ok(())
    }

    /// Release every coil and mark the cursor idle
    ///
    /// Every output named by the table is driven off, even if an earlier
    /// one fails. The cursor is reset regardless and the first error, if
    /// any, is returned.
    pub fn all_off(&mut self) -> Result<(), DriveError> {
        let mut result = Ok(());
        let mut analog_done = false;

        for index in 0..self.table.len() {
            let outcome = match self.table.get(index) {
                PhaseState::Analog(..) if analog_done => continue,
                PhaseState::Analog(..) => {
                    analog_done = true;
                    let a = self.driver.set_analog(0, 0.0);
                    let b = self.driver.set_analog(1, 0.0);
                    a.and(b)
                }
                PhaseState::Discrete(pin) => self.driver.set_discrete(pin, false),
            };

            if let Err(e) = outcome {
                #[cfg(feature = "defmt")]
                defmt::warn!("All-off output {} failed: {}", index, e);
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        self.cursor = None;
        result
    }

    /// Seat the coils on the last phase before the first step from idle
    fn seat(&mut self) -> Result<(), DriveError> {
        let last = self.table.last_index();

        #[cfg(feature = "defmt")]
        defmt::debug!("Seating coils on phase {}", last);

        match self.table.get(last) {
            PhaseState::Analog(a, b) => self.set_coils(a, b)?,
            PhaseState::Discrete(pin) => self.driver.set_discrete(pin, true)?,
        }

        self.cursor = Some(last);
        Ok(())
    }

    /// Drive the outputs for the phase at `index`
    fn apply(&mut self, index: usize) -> Result<(), DriveError> {
        match self.table.get(index) {
            PhaseState::Analog(a, b) => self.set_coils(a, b),
            PhaseState::Discrete(pin) => {
                if let PhaseState::Discrete(stale) = self.table.get(self.table.behind(index, 2)) {
                    self.driver.set_discrete(stale, false)?;
                }
                self.driver.set_discrete(pin, true)
            }
        }
    }

    fn set_coils(&mut self, a: f32, b: f32) -> Result<(), DriveError> {
        self.driver.set_analog(0, a)?;
        self.driver.set_analog(1, b)
    }

    /// Consume the sequencer, returning the driver and delay provider
    ///
    /// The outputs are left as they are; call [`Sequencer::all_off`] first
    /// to release the motor.
    pub fn release(self) -> (D, T) {
        (self.driver, self.delay)
    }
}
