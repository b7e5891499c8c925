//! Line assembly for the console protocol
//!
//! Bytes arrive from the UART in arbitrary chunks. The line buffer collects
//! them until a newline and hands back one complete command line at a time.
//!
//! - `\n` terminates a line, `\r` is ignored (so `\r\n` works too)
//! - Backspace (0x08) and DEL (0x7F) erase the previous character
//! - Empty lines are skipped
//! - Lines longer than [`MAX_LINE_LEN`] or containing non-ASCII bytes are
//!   discarded up to the next newline and reported once

use heapless::String;

/// Maximum command line length in bytes (excluding the terminator)
pub const MAX_LINE_LEN: usize = 64;

/// Errors reported when a line is discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`]
    TooLong,
    /// Line contained a non-ASCII or control byte
    InvalidByte,
}

impl LineError {
    /// Short lowercase description, suitable for console replies
    pub fn as_str(self) -> &'static str {
        match self {
            LineError::TooLong => "line too long",
            LineError::InvalidByte => "invalid byte",
        }
    }
}

/// Accumulates bytes into command lines
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    line: String<MAX_LINE_LEN>,
    discard: Option<LineError>,
}

impl LineBuffer {
    /// Create an empty line buffer
    pub fn new() -> Self {
        Self {
            line: String::new(),
            discard: None,
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.line.clear();
        self.discard = None;
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a complete non-empty line is available,
    /// `Ok(None)` when more bytes are needed, or `Err` when a discarded line
    /// has been terminated.
    pub fn feed(&mut self, byte: u8) -> Result<Option<String<MAX_LINE_LEN>>, LineError> {
        match byte {
            b'\n' => {
                if let Some(e) = self.discard.take() {
                    self.line.clear();
                    return Err(e);
                }
                let line = core::mem::take(&mut self.line);
                if line.trim().is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(line))
                }
            }
            b'\r' => Ok(None),
            0x08 | 0x7F => {
                self.line.pop();
                Ok(None)
            }
            _ if self.discard.is_some() => Ok(None),
            b'\t' | 0x20..=0x7E => {
                if self.line.push(byte as char).is_err() {
                    self.discard = Some(LineError::TooLong);
                }
                Ok(None)
            }
            _ => {
                self.discard = Some(LineError::InvalidByte);
                Ok(None)
            }
        }
    }
}
