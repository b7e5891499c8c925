//! Console replies
//!
//! Every command produces exactly one reply line:
//!
//! ```text
//! ok steps=200
//! ok off
//! ok cursor=3
//! ok cursor=idle
//! bye
//! err bus fault
//! ```

use core::fmt::{self, Write};

use heapless::String;

/// Maximum reply line length in bytes, including the `\r\n` terminator
pub const MAX_REPLY_LEN: usize = 48;

/// A reply to one console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply<'a> {
    /// Console is ready for commands
    Ready,
    /// Move finished after the given number of unit steps
    Moved { steps: i32 },
    /// All coils released
    Off,
    /// Current phase cursor, `None` while idle
    Status { cursor: Option<usize> },
    /// Session ended, coils released
    Bye,
    /// Command failed
    Error(&'a str),
}

impl fmt::Display for Reply<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ready => f.write_str("ready"),
            Reply::Moved { steps } => write!(f, "ok steps={}", steps),
            Reply::Off => f.write_str("ok off"),
            Reply::Status { cursor: Some(c) } => write!(f, "ok cursor={}", c),
            Reply::Status { cursor: None } => f.write_str("ok cursor=idle"),
            Reply::Bye => f.write_str("bye"),
            Reply::Error(reason) => write!(f, "err {}", reason),
        }
    }
}

impl Reply<'_> {
    /// Format as a terminated line ready to write to the UART
    ///
    /// Overlong error reasons are truncated to fit.
    pub fn to_line(&self) -> String<MAX_REPLY_LEN> {
        let mut line = String::new();
        let mut body: String<{ MAX_REPLY_LEN - 2 }> = String::new();
        // A full buffer keeps what fit
        let _ = write!(TruncatingWriter(&mut body), "{}", self);
        let _ = line.push_str(&body);
        let _ = line.push_str("\r\n");
        line
    }
}

/// Writer that silently stops at capacity instead of failing mid-format
struct TruncatingWriter<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for TruncatingWriter<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}
