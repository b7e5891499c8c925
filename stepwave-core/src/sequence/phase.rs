//! Phase states and the wrap-around phase table
//!
//! A phase table is the ordered list of coil states the motor walks through,
//! one entry per unit step. Tables are validated once at construction and
//! are immutable afterwards.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::WAVE_PIN_COUNT;

/// Maximum number of phases in a table
pub const MAX_PHASES: usize = 8;

/// Minimum number of phases in a table
pub const MIN_PHASES: usize = 2;

/// Bipolar full-step sequence (coil A, coil B)
pub const BIPOLAR_FULL_STEP: [(f32, f32); 4] = [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0)];

/// Default wave-drive pin order: drive 1, drive 3, drive 2, drive 4
pub const DEFAULT_WAVE_ORDER: [u8; 4] = [0, 2, 1, 3];

/// One step position of the motor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PhaseState {
    /// Signed drive levels for coil A and coil B, each in [-1.0, 1.0]
    Analog(f32, f32),
    /// Pin slot to assert (wave drive with one step of overlap)
    Discrete(u8),
}

impl PhaseState {
    fn is_analog(&self) -> bool {
        matches!(self, PhaseState::Analog(..))
    }
}

/// Which output kind a table drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseKind {
    /// Two analog coil channels
    Analog,
    /// Discrete coil pins
    Discrete,
}

/// Errors building a phase table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TableError {
    /// Fewer than [`MIN_PHASES`] states
    TooShort,
    /// More than [`MAX_PHASES`] states
    TooLong,
    /// Analog level outside [-1.0, 1.0] or not finite
    LevelOutOfRange,
    /// Analog and discrete states in the same table
    MixedVariants,
    /// Discrete pin outside the wave driver's pin slots
    InvalidPin,
}

/// Fixed, ordered sequence of phase states
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseTable {
    phases: Vec<PhaseState, MAX_PHASES>,
}

impl PhaseTable {
    /// Build a table from a list of states
    pub fn new(states: &[PhaseState]) -> Result<Self, TableError> {
        if states.len() < MIN_PHASES {
            return Err(TableError::TooShort);
        }

        let analog = states[0].is_analog();
        let mut phases = Vec::new();

        for state in states {
            if state.is_analog() != analog {
                return Err(TableError::MixedVariants);
            }
            match *state {
                PhaseState::Analog(a, b) => {
                    if !level_in_range(a) || !level_in_range(b) {
                        return Err(TableError::LevelOutOfRange);
                    }
                }
                PhaseState::Discrete(pin) => {
                    if pin >= WAVE_PIN_COUNT {
                        return Err(TableError::InvalidPin);
                    }
                }
            }
            phases.push(*state).map_err(|_| TableError::TooLong)?;
        }

        Ok(Self { phases })
    }

    /// Two-coil bipolar full-step table
    pub fn bipolar_full_step() -> Self {
        let phases = BIPOLAR_FULL_STEP
            .iter()
            .map(|&(a, b)| PhaseState::Analog(a, b))
            .collect();
        Self { phases }
    }

    /// Four-phase wave-drive table energizing pins in the given order
    pub fn wave(order: [u8; 4]) -> Result<Self, TableError> {
        Self::new(&order.map(PhaseState::Discrete))
    }

    /// Number of phases (N)
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false; a valid table holds at least two phases
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Output kind driven by this table
    pub fn kind(&self) -> PhaseKind {
        if self.phases[0].is_analog() {
            PhaseKind::Analog
        } else {
            PhaseKind::Discrete
        }
    }

    /// Phase at `index`, taken modulo N
    pub fn get(&self, index: usize) -> PhaseState {
        self.phases[index % self.phases.len()]
    }

    /// Index of the last phase (N - 1)
    pub fn last_index(&self) -> usize {
        self.phases.len() - 1
    }

    /// Advance `index` by one unit step in `direction` (+1 or -1)
    ///
    /// Below zero wraps to N - 1 and past the end wraps to 0.
    pub fn advance(&self, index: usize, direction: i8) -> usize {
        let next = index as isize + direction as isize;
        if next < 0 {
            self.last_index()
        } else if next as usize >= self.phases.len() {
            0
        } else {
            next as usize
        }
    }

    /// Index `distance` positions behind `index`, modulo N
    pub fn behind(&self, index: usize, distance: usize) -> usize {
        let n = self.phases.len();
        (index % n + n - distance % n) % n
    }

    /// Iterate over all phases in order
    pub fn iter(&self) -> impl Iterator<Item = &PhaseState> {
        self.phases.iter()
    }
}

fn level_in_range(level: f32) -> bool {
    (-1.0..=1.0).contains(&level)
}
