//! Machine configuration parser
//!
//! A minimal line-based reader for the embedded `machine.toml`. Only what
//! a `[motor]` table needs is understood:
//!
//! - a single `[motor]` section
//! - basic (`"wave"`) and literal (`'wave'`) strings without escapes
//! - integers with `_` separators and `0x`/`0o`/`0b` prefixes
//! - floats, and integers where a float is expected
//! - a flat integer array, which may span several lines
//! - `#` comments, both full-line and trailing
//!
//! build.rs runs this same parser over machine.toml and fails the build on
//! any error, so a configuration that builds also parses at boot.

use stepwave_core::config::{ConfigError, DriveMode, MotorConfig};

/// Longest number literal accepted, separators included
const MAX_NUMBER_LEN: usize = 32;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseError {
    /// Section other than `[motor]`
    InvalidSection,
    /// Key outside a section or not a motor key
    UnknownKey,
    /// Line is not `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Array opened but never closed
    UnterminatedArray,
    /// Values parsed but do not form a valid configuration
    Config(ConfigError),
}

impl ParseError {
    /// Short description for build and boot diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseError::InvalidSection => "only a [motor] section is allowed",
            ParseError::UnknownKey => "unknown key or key outside [motor]",
            ParseError::InvalidLine => "expected 'key = value'",
            ParseError::InvalidValue => "value has the wrong type or is out of range",
            ParseError::UnterminatedArray => "array is missing its closing ']'",
            ParseError::Config(ConfigError::InvalidDegreesPerStep) => {
                "degrees_per_step must be finite and greater than zero"
            }
            ParseError::Config(ConfigError::InvalidWaveOrder) => {
                "wave_order must list 0, 1, 2 and 3 once each"
            }
            ParseError::Config(_) => "invalid motor configuration",
        }
    }
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

/// Parse the `[motor]` table into a validated [`MotorConfig`]
///
/// Keys that are not present keep their defaults.
pub fn parse_config(input: &str) -> Result<MotorConfig, ParseError> {
    let mut config = MotorConfig::default();
    let mut in_motor = false;
    let mut lines = input.lines();

    while let Some(line) = lines.next() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if header.trim() != "motor" {
                return Err(ParseError::InvalidSection);
            }
            in_motor = true;
            continue;
        }

        if !in_motor {
            return Err(ParseError::UnknownKey);
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidLine)?;
        let value = value.trim();

        match key.trim() {
            "mode" => config.mode = parse_mode(value)?,
            "wave_order" => config.wave_order = parse_order(value, &mut lines)?,
            "step_delay_us" => {
                config.step_delay_us =
                    u32::try_from(parse_integer(value)?).map_err(|_| ParseError::InvalidValue)?
            }
            "degrees_per_step" => config.degrees_per_step = parse_float(value)?,
            _ => return Err(ParseError::UnknownKey),
        }
    }

    config.validate()?;
    Ok(config)
}

/// Drop a trailing `#` comment (strings here never contain `#`)
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_mode(value: &str) -> Result<DriveMode, ParseError> {
    match unquote(value)? {
        "bipolar" => Ok(DriveMode::Bipolar),
        "wave" => Ok(DriveMode::Wave),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Strip `"..."` or `'...'`; escapes are not supported
fn unquote(value: &str) -> Result<&str, ParseError> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .ok_or(ParseError::InvalidValue)?;

    if inner.contains(&['"', '\'', '\\'][..]) {
        return Err(ParseError::InvalidValue);
    }
    Ok(inner)
}

/// Parse `[a, b, c, d]`, reading further lines until the closing bracket
fn parse_order<'a>(
    value: &'a str,
    rest: &mut impl Iterator<Item = &'a str>,
) -> Result<[u8; 4], ParseError> {
    let mut body = value.strip_prefix('[').ok_or(ParseError::InvalidValue)?;
    let mut order = [0u8; 4];
    let mut count = 0;

    loop {
        let (items, closed) = match body.find(']') {
            Some(pos) => {
                if !body[pos + 1..].trim().is_empty() {
                    return Err(ParseError::InvalidValue);
                }
                (&body[..pos], true)
            }
            None => (body, false),
        };

        for item in items.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let slot = order.get_mut(count).ok_or(ParseError::InvalidValue)?;
            *slot = u8::try_from(parse_integer(item)?).map_err(|_| ParseError::InvalidValue)?;
            count += 1;
        }

        if closed {
            break;
        }
        let next = rest.next().ok_or(ParseError::UnterminatedArray)?;
        body = strip_comment(next).trim();
    }

    if count != order.len() {
        return Err(ParseError::InvalidValue);
    }
    Ok(order)
}

/// Parse a non-negative integer literal
fn parse_integer(value: &str) -> Result<u64, ParseError> {
    let value = value.strip_prefix('+').unwrap_or(value);
    let (digits, radix) = if let Some(hex) = value.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(oct) = value.strip_prefix("0o") {
        (oct, 8)
    } else if let Some(bin) = value.strip_prefix("0b") {
        (bin, 2)
    } else {
        (value, 10)
    };

    let mut buf = [0u8; MAX_NUMBER_LEN];
    let digits = strip_separators(digits, &mut buf)?;
    if digits.starts_with(&['+', '-'][..]) {
        return Err(ParseError::InvalidValue);
    }
    u64::from_str_radix(digits, radix).map_err(|_| ParseError::InvalidValue)
}

fn parse_float(value: &str) -> Result<f32, ParseError> {
    let mut buf = [0u8; MAX_NUMBER_LEN];
    let number = strip_separators(value, &mut buf)?;
    number.parse().map_err(|_| ParseError::InvalidValue)
}

/// Copy `value` into `buf` without `_` separators
///
/// A separator must sit between two digits.
fn strip_separators<'b>(value: &str, buf: &'b mut [u8]) -> Result<&'b str, ParseError> {
    let bytes = value.as_bytes();
    let mut len = 0;

    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let before = i.checked_sub(1).and_then(|j| bytes.get(j));
            let after = bytes.get(i + 1);
            let between = matches!((before, after), (Some(x), Some(y))
                if x.is_ascii_hexdigit() && y.is_ascii_hexdigit());
            if !between {
                return Err(ParseError::InvalidValue);
            }
            continue;
        }
        let slot = buf.get_mut(len).ok_or(ParseError::InvalidValue)?;
        *slot = b;
        len += 1;
    }

    core::str::from_utf8(&buf[..len]).map_err(|_| ParseError::InvalidValue)
}
