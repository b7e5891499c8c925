//! Console session
//!
//! Couples a sequencer with an angle converter and carries out console
//! commands the way an interactive operator session expects:
//!
//! - all coils off when the session begins
//! - step and angle moves continue from the last phase
//! - `off` and `quit` release the motor so it does not stay energized
//!
//! Drive faults are reported to the caller and followed by a best-effort
//! release of every coil.

use embedded_hal::delay::DelayNs;
use stepwave_protocol::{Command, Reply};

use crate::sequence::{AngleConverter, Sequencer};
use crate::traits::{CoilDriver, DriveError};

/// Error reply when coils could not be released after a drive fault
pub const RELEASE_FAILED: &str = "release failed";

/// Interactive motor session
pub struct Session<D, T> {
    sequencer: Sequencer<D, T>,
    converter: AngleConverter,
}

impl<D: CoilDriver, T: DelayNs> Session<D, T> {
    /// Create a session around a sequencer
    pub fn new(sequencer: Sequencer<D, T>, converter: AngleConverter) -> Self {
        Self {
            sequencer,
            converter,
        }
    }

    /// Turn every coil off before accepting commands
    pub fn begin(&mut self) -> Result<Reply<'static>, DriveError> {
        self.sequencer.all_off()?;
        Ok(Reply::Ready)
    }

    /// Execute one command, propagating drive faults
    pub fn execute(&mut self, command: Command) -> Result<Reply<'static>, DriveError> {
        match command {
            Command::Steps(steps) => {
                self.sequencer.move_steps(steps)?;
                Ok(Reply::Moved { steps })
            }
            Command::Degrees(angle) => {
                let steps = self.converter.steps_for(angle);
                self.sequencer.move_steps(steps)?;
                Ok(Reply::Moved { steps })
            }
            Command::Off => {
                self.sequencer.all_off()?;
                Ok(Reply::Off)
            }
            Command::Status => Ok(Reply::Status {
                cursor: self.sequencer.cursor(),
            }),
            Command::Quit => {
                self.sequencer.all_off()?;
                Ok(Reply::Bye)
            }
        }
    }

    /// Execute one command, turning drive faults into an error reply
    ///
    /// After a fault every coil is released; the motor must not be left
    /// energized in an unknown phase. If that release fails too the reply
    /// is [`RELEASE_FAILED`], since coils may still be energized.
    pub fn handle(&mut self, command: Command) -> Reply<'static> {
        match self.execute(command) {
            Ok(reply) => reply,
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Command {} failed: {}", command, e);
                match self.sequencer.all_off() {
                    Ok(()) => Reply::Error(e.as_str()),
                    Err(_release) => {
                        #[cfg(feature = "defmt")]
                        defmt::error!("Coil release after fault failed: {}", _release);
                        Reply::Error(RELEASE_FAILED)
                    }
                }
            }
        }
    }

    /// Borrow the sequencer
    pub fn sequencer(&self) -> &Sequencer<D, T> {
        &self.sequencer
    }

    /// Release the motor and hand back the sequencer
    pub fn end(mut self) -> (Sequencer<D, T>, Result<(), DriveError>) {
        let result = self.sequencer.all_off();
        (self.sequencer, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::test_support::{Call, CountingDelay, RecordingDriver};
    use crate::sequence::{PhaseTable, DEFAULT_WAVE_ORDER};

    fn session() -> Session<RecordingDriver, CountingDelay> {
        let seq = Sequencer::new(
            PhaseTable::wave(DEFAULT_WAVE_ORDER).unwrap(),
            2_000,
            RecordingDriver::new(),
            CountingDelay::new(),
        );
        Session::new(seq, AngleConverter::default())
    }

    #[test]
    fn test_begin_turns_everything_off() {
        let mut s = session();
        assert_eq!(s.begin(), Ok(Reply::Ready));
        assert_eq!(s.sequencer().driver().calls.len(), 4);
        assert!(s
            .sequencer()
            .driver()
            .calls
            .iter()
            .all(|c| matches!(c, Call::Discrete(_, false))));
    }

    #[test]
    fn test_steps_and_status() {
        let mut s = session();
        s.begin().unwrap();

        assert_eq!(s.handle(Command::Steps(6)), Reply::Moved { steps: 6 });
        assert_eq!(s.handle(Command::Status), Reply::Status { cursor: Some(1) });

        assert_eq!(s.handle(Command::Steps(-2)), Reply::Moved { steps: -2 });
        assert_eq!(s.handle(Command::Status), Reply::Status { cursor: Some(3) });
    }

    #[test]
    fn test_degrees_convert() {
        let mut s = session();
        assert_eq!(s.handle(Command::Degrees(90.0)), Reply::Moved { steps: 50 });
        assert_eq!(s.handle(Command::Degrees(-1.0)), Reply::Moved { steps: 0 });
        assert_eq!(s.handle(Command::Degrees(-360.0)), Reply::Moved { steps: -200 });
    }

    #[test]
    fn test_off_and_quit_release() {
        let mut s = session();
        s.handle(Command::Steps(3));

        assert_eq!(s.handle(Command::Off), Reply::Off);
        assert_eq!(s.handle(Command::Status), Reply::Status { cursor: None });
        assert_eq!(s.sequencer().driver().energized(), [false; 4]);

        s.handle(Command::Steps(1));
        assert_eq!(s.handle(Command::Quit), Reply::Bye);
        assert!(s.sequencer().is_idle());
        assert_eq!(s.sequencer().driver().energized(), [false; 4]);
    }

    #[test]
    fn test_fault_reports_and_releases() {
        let mut s = session();
        s.handle(Command::Steps(2));

        let attempts = s.sequencer.driver().attempts;
        s.driver_mut().fail_only = Some(attempts);

        assert_eq!(s.handle(Command::Steps(4)), Reply::Error("bus fault"));
        assert!(s.sequencer().is_idle());
        assert_eq!(s.sequencer().driver().energized(), [false; 4]);
    }

    #[test]
    fn test_failed_release_is_reported() {
        let mut s = session();
        s.handle(Command::Steps(2));

        // Every call from here on fails: the move and the release after it
        let attempts = s.sequencer().driver().attempts;
        s.driver_mut().fail_after = Some(attempts);

        assert_eq!(s.handle(Command::Steps(1)), Reply::Error(RELEASE_FAILED));
        // Release was attempted on every pin even though each one failed
        assert_eq!(s.sequencer().driver().attempts, attempts + 1 + 4);
        assert!(s.sequencer().is_idle());

        s.driver_mut().fail_after = None;
        assert_eq!(s.handle(Command::Off), Reply::Off);
    }

    #[test]
    fn test_execute_propagates_fault() {
        let mut s = session();
        s.driver_mut().fail_after = Some(0);
        assert_eq!(s.execute(Command::Off), Err(DriveError::Bus));
    }

    #[test]
    fn test_end_releases() {
        let mut s = session();
        s.handle(Command::Steps(5));
        let (seq, result) = s.end();
        assert!(result.is_ok());
        assert!(seq.is_idle());
    }

    impl Session<RecordingDriver, CountingDelay> {
        fn driver_mut(&mut self) -> &mut RecordingDriver {
            self.sequencer.driver_mut()
        }
    }
}
