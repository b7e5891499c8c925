//! Property tests for the cyclic phase walk

use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use proptest::prelude::*;
use stepwave_core::sequence::{AngleConverter, PhaseState, PhaseTable, Sequencer};
use stepwave_core::traits::{CoilDriver, DriveError};

/// Driver that tracks pin state and counts phase applies
#[derive(Default)]
struct PinBank {
    pins: [bool; 4],
    analog_writes: usize,
    discrete_writes: Vec<(u8, bool)>,
}

impl CoilDriver for PinBank {
    fn set_analog(&mut self, _coil: u8, _level: f32) -> Result<(), DriveError> {
        self.analog_writes += 1;
        Ok(())
    }

    fn set_discrete(&mut self, pin: u8, energized: bool) -> Result<(), DriveError> {
        self.pins[pin as usize] = energized;
        self.discrete_writes.push((pin, energized));
        Ok(())
    }
}

#[derive(Default)]
struct NoDelay {
    sleeps: usize,
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {
        self.sleeps += 1;
    }
}

/// Analog table of length `n` with distinct levels per phase
fn analog_table(n: usize) -> PhaseTable {
    let states: Vec<PhaseState> = (0..n)
        .map(|i| {
            let level = i as f32 / n as f32;
            PhaseState::Analog(level, -level)
        })
        .collect();
    PhaseTable::new(&states).unwrap()
}

fn sequencer(n: usize) -> Sequencer<PinBank, NoDelay> {
    Sequencer::new(analog_table(n), 0, PinBank::default(), NoDelay::default())
}

fn wave_orders() -> impl Strategy<Value = [u8; 4]> {
    Just(vec![0u8, 1, 2, 3]).prop_shuffle().prop_map(|v| [v[0], v[1], v[2], v[3]])
}

proptest! {
    #[test]
    fn multiple_of_n_returns_to_start(
        n in 2usize..=8,
        moves in proptest::collection::vec(-40i32..40, 0..6),
        laps in -3i32..3,
    ) {
        let mut seq = sequencer(n);
        seq.move_steps(1).unwrap();
        let start = seq.cursor();

        let mut total: i32 = moves.iter().sum();
        for &m in &moves {
            seq.move_steps(m).unwrap();
        }
        // Close the walk on a multiple of N
        let closing = laps * n as i32 - total.rem_euclid(n as i32);
        seq.move_steps(closing).unwrap();
        total += closing;

        prop_assert_eq!(total.rem_euclid(n as i32), 0);
        prop_assert_eq!(seq.cursor(), start);
    }

    #[test]
    fn move_then_reverse_is_identity(n in 2usize..=8, warmup in -20i32..20, k in -50i32..50) {
        let mut seq = sequencer(n);
        seq.move_steps(1).unwrap();
        seq.move_steps(warmup).unwrap();
        let before = seq.cursor();

        seq.move_steps(k).unwrap();
        seq.move_steps(-k).unwrap();

        prop_assert_eq!(seq.cursor(), before);
    }

    #[test]
    fn one_delay_per_unit_step(n in 2usize..=8, moves in proptest::collection::vec(-30i32..30, 0..8)) {
        let mut seq = sequencer(n);
        for &m in &moves {
            seq.move_steps(m).unwrap();
        }
        let expected: usize = moves.iter().map(|m| m.unsigned_abs() as usize).sum();
        let seated = usize::from(expected > 0);
        let (driver, delay) = seq.release();

        prop_assert_eq!(delay.sleeps, expected);
        // Two coil writes per apply, plus one extra apply for the seat
        prop_assert_eq!(driver.analog_writes, 2 * (expected + seated));
    }

    #[test]
    fn wave_step_releases_two_behind_only(order in wave_orders(), moves in proptest::collection::vec(-9i32..9, 1..6)) {
        let table = PhaseTable::wave(order).unwrap();
        let mut seq = Sequencer::new(table.clone(), 0, PinBank::default(), NoDelay::default());
        seq.move_steps(1).unwrap();

        for &m in &moves {
            let direction = m.signum();
            for _ in 0..m.unsigned_abs() {
                let before = seq.driver().pins;
                seq.move_steps(direction).unwrap();

                let c = seq.cursor().unwrap();
                let PhaseState::Discrete(current) = table.get(c) else { unreachable!() };
                let PhaseState::Discrete(stale) = table.get(table.behind(c, 2)) else { unreachable!() };
                let after = seq.driver().pins;

                prop_assert!(after[current as usize]);
                prop_assert!(!after[stale as usize]);
                for pin in 0..4u8 {
                    if pin != current && pin != stale {
                        prop_assert_eq!(after[pin as usize], before[pin as usize]);
                    }
                }
            }
        }
    }

    #[test]
    fn all_off_retriggers_seat(n in 2usize..=8, warmup in 1i32..30) {
        let mut seq = sequencer(n);
        seq.move_steps(warmup).unwrap();
        seq.all_off().unwrap();
        prop_assert!(seq.is_idle());

        let writes_before = seq.driver().analog_writes;
        seq.move_steps(1).unwrap();

        prop_assert_eq!(seq.cursor(), Some(0));
        prop_assert_eq!(seq.driver().analog_writes - writes_before, 4);
    }
}

#[test]
fn full_turn_in_degrees_is_two_hundred_steps() {
    let converter = AngleConverter::default();

    let mut by_angle = sequencer(4);
    converter.move_degrees(&mut by_angle, 360.0).unwrap();
    let mut by_steps = sequencer(4);
    by_steps.move_steps(200).unwrap();
    assert_eq!(by_angle.cursor(), by_steps.cursor());

    let mut back = sequencer(4);
    converter.move_degrees(&mut back, -360.0).unwrap();
    let (driver, delay) = back.release();
    assert_eq!(delay.sleeps, 200);
    assert_eq!(driver.analog_writes, 2 * 201);
}

#[test]
fn zero_steps_touch_nothing() {
    let mut seq = sequencer(4);
    seq.move_steps(0).unwrap();
    let (driver, delay) = seq.release();
    assert_eq!(driver.analog_writes, 0);
    assert!(driver.discrete_writes.is_empty());
    assert_eq!(delay.sleeps, 0);
}
