//! Stepwave console protocol
//!
//! This crate defines the line-oriented text protocol spoken over the
//! firmware's UART console. The protocol is designed to be typed by hand
//! in a serial terminal as well as driven by scripts.
//!
//! # Protocol Overview
//!
//! ```text
//! host → motor:  steps 200\r\n
//! motor → host:  ok steps=200\r\n
//! ```
//!
//! - [`line::LineBuffer`] assembles incoming bytes into lines
//! - [`command::Command`] parses one line into a command
//! - [`reply::Reply`] formats the single-line answer

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod reply;

pub use command::{Command, ParseError};
pub use line::{LineBuffer, LineError, MAX_LINE_LEN};
pub use reply::{Reply, MAX_REPLY_LEN};
