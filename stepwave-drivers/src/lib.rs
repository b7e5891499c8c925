//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the [`CoilDriver`]
//! trait defined in stepwave-core, on top of `embedded-hal` 1.0:
//!
//! - Wave drive over four GPIO outputs (ULN2003, Darlington arrays)
//! - Bipolar drive over two PWM H-bridge channels (DRV8833, L298N)
//!
//! [`CoilDriver`]: stepwave_core::traits::CoilDriver

#![no_std]
#![deny(unsafe_code)]

pub mod coil;
