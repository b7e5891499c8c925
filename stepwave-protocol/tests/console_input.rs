//! Property tests for console input handling

use proptest::prelude::*;
use stepwave_protocol::{Command, LineBuffer, LineError, MAX_LINE_LEN};

proptest! {
    #[test]
    fn steps_command_accepts_any_i32(n in any::<i32>()) {
        let line = format!("steps {}", n);
        prop_assert_eq!(Command::parse(&line), Ok(Command::Steps(n)));
    }

    #[test]
    fn bare_integer_is_steps_unless_zero(n in any::<i32>()) {
        let expected = if n == 0 { Command::Quit } else { Command::Steps(n) };
        prop_assert_eq!(Command::parse(&n.to_string()), Ok(expected));
    }

    #[test]
    fn keywords_ignore_case_and_padding(pad in "[ \t]{0,4}", upper in any::<bool>()) {
        let word = if upper { "OFF" } else { "off" };
        let line = format!("{pad}{word}{pad}");
        prop_assert_eq!(Command::parse(&line), Ok(Command::Off));
    }

    #[test]
    fn line_buffer_survives_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut buf = LineBuffer::new();
        for byte in bytes {
            if let Ok(Some(line)) = buf.feed(byte) {
                prop_assert!(!line.is_empty());
                prop_assert!(line.len() <= MAX_LINE_LEN);
                prop_assert!(line.is_ascii());
            }
        }
    }

    #[test]
    fn every_short_line_comes_back_whole(text in "[a-z0-9 .-]{1,64}") {
        prop_assume!(!text.trim().is_empty());
        let mut buf = LineBuffer::new();
        let mut out = None;
        for &byte in text.as_bytes().iter().chain(b"\r\n") {
            if let Some(line) = buf.feed(byte).unwrap() {
                out = Some(line);
            }
        }
        let out = out.unwrap();
        prop_assert_eq!(out.as_str(), text.as_str());
    }
}

#[test]
fn oversized_line_reports_once() {
    let mut buf = LineBuffer::new();
    let mut errors = 0;
    for &byte in [b'9'; MAX_LINE_LEN * 2].iter().chain(b"\nq\n") {
        match buf.feed(byte) {
            Err(LineError::TooLong) => errors += 1,
            Err(e) => panic!("unexpected error {:?}", e),
            Ok(Some(line)) => assert_eq!(line.as_str(), "q"),
            Ok(None) => {}
        }
    }
    assert_eq!(errors, 1);
}
