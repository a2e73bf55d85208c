//! Hardware driver implementations
//!
//! This crate implements the capability traits of furrow-core on top of
//! `embedded-hal` 1.0 so any HAL with infallible pins can run a mission:
//!
//! - H-bridge differential drive (two direction pins + PWM per wheel)
//! - GPIO sprayer valve and buzzer
//! - [`rover::Rover`], a composite board built from individual parts

#![no_std]
#![deny(unsafe_code)]

pub mod actuator;
pub mod drive;
pub mod rover;

use core::convert::Infallible;

/// Unwrap a result whose error type cannot be constructed
pub(crate) fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
