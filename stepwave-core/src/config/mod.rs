//! Configuration types
//!
//! Board-agnostic motor configuration, optionally stored as postcard binary data.

pub mod motor;

pub use motor::*;
