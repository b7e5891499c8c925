//! Console commands
//!
//! One command per line. Keywords are case-insensitive.
//!
//! | Input                      | Command        |
//! |----------------------------|----------------|
//! | `<int>` (non-zero)         | `Steps(n)`     |
//! | `0`                        | `Quit`         |
//! | `steps <int>`, `s <int>`   | `Steps(n)`     |
//! | `deg <float>`, `d <float>` | `Degrees(a)`   |
//! | `off`                      | `Off`          |
//! | `status`                   | `Status`       |
//! | `quit`, `q`                | `Quit`         |
//!
//! A bare `0` quits, like a "steps to move (0 to quit)" prompt.
//! An explicit `steps 0` is a no-op move.

/// A parsed console command
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Move by a signed number of unit steps
    Steps(i32),
    /// Move by a signed angle in degrees
    Degrees(f32),
    /// Release all coils
    Off,
    /// Report the phase cursor
    Status,
    /// Release all coils and end the session
    Quit,
}

/// Errors parsing a command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line contained only whitespace
    Empty,
    /// First word is not a known command
    UnknownCommand,
    /// Command needs an argument
    MissingArgument,
    /// Argument is not a valid number
    InvalidNumber,
    /// Extra words after the command
    TrailingInput,
}

impl ParseError {
    /// Short lowercase description, suitable for console replies
    pub fn as_str(self) -> &'static str {
        match self {
            ParseError::Empty => "empty command",
            ParseError::UnknownCommand => "unknown command",
            ParseError::MissingArgument => "missing argument",
            ParseError::InvalidNumber => "invalid number",
            ParseError::TrailingInput => "unexpected input",
        }
    }
}

impl Command {
    /// Parse a single command line
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_ascii_whitespace();
        let keyword = words.next().ok_or(ParseError::Empty)?;

        let command = if is_number(keyword) {
            match keyword.parse::<i32>() {
                Ok(0) => Command::Quit,
                Ok(steps) => Command::Steps(steps),
                Err(_) => return Err(ParseError::InvalidNumber),
            }
        } else if matches_any(keyword, &["steps", "step", "s"]) {
            let arg = words.next().ok_or(ParseError::MissingArgument)?;
            Command::Steps(arg.parse().map_err(|_| ParseError::InvalidNumber)?)
        } else if matches_any(keyword, &["deg", "degrees", "d"]) {
            let arg = words.next().ok_or(ParseError::MissingArgument)?;
            let angle: f32 = arg.parse().map_err(|_| ParseError::InvalidNumber)?;
            if !angle.is_finite() {
                return Err(ParseError::InvalidNumber);
            }
            Command::Degrees(angle)
        } else if matches_any(keyword, &["off"]) {
            Command::Off
        } else if matches_any(keyword, &["status"]) {
            Command::Status
        } else if matches_any(keyword, &["quit", "q"]) {
            Command::Quit
        } else {
            return Err(ParseError::UnknownCommand);
        };

        if words.next().is_some() {
            return Err(ParseError::TrailingInput);
        }

        Ok(command)
    }
}

fn is_number(word: &str) -> bool {
    let digits = word.strip_prefix(&['-', '+'][..]).unwrap_or(word);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn matches_any(word: &str, names: &[&str]) -> bool {
    names.iter().any(|name| word.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_integer() {
        assert_eq!(Command::parse("200"), Ok(Command::Steps(200)));
        assert_eq!(Command::parse("-50"), Ok(Command::Steps(-50)));
        assert_eq!(Command::parse("+3"), Ok(Command::Steps(3)));
    }

    #[test]
    fn test_bare_zero_quits() {
        assert_eq!(Command::parse("0"), Ok(Command::Quit));
        assert_eq!(Command::parse("  -0 "), Ok(Command::Quit));
    }

    #[test]
    fn test_explicit_steps() {
        assert_eq!(Command::parse("steps 0"), Ok(Command::Steps(0)));
        assert_eq!(Command::parse("S -7"), Ok(Command::Steps(-7)));
        assert_eq!(Command::parse("step 12"), Ok(Command::Steps(12)));
    }

    #[test]
    fn test_degrees() {
        assert_eq!(Command::parse("deg 90"), Ok(Command::Degrees(90.0)));
        assert_eq!(Command::parse("d -360"), Ok(Command::Degrees(-360.0)));
        assert_eq!(Command::parse("DEG 1.8"), Ok(Command::Degrees(1.8)));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(Command::parse("off"), Ok(Command::Off));
        assert_eq!(Command::parse("Status"), Ok(Command::Status));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("Q"), Ok(Command::Quit));
    }

    #[test]
    fn test_errors() {
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(Command::parse("spin 3"), Err(ParseError::UnknownCommand));
        assert_eq!(Command::parse("steps"), Err(ParseError::MissingArgument));
        assert_eq!(Command::parse("steps x"), Err(ParseError::InvalidNumber));
        assert_eq!(Command::parse("deg nan"), Err(ParseError::InvalidNumber));
        assert_eq!(Command::parse("deg inf"), Err(ParseError::InvalidNumber));
        assert_eq!(Command::parse("off now"), Err(ParseError::TrailingInput));
        assert_eq!(
            Command::parse("99999999999"),
            Err(ParseError::InvalidNumber)
        );
    }
}
