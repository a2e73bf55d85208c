//! Board-agnostic control logic for the row-spraying rover
//!
//! This crate contains everything that decides what the rover does each
//! control cycle, independent of the board it runs on:
//!
//! - Mission configuration and reference constants
//! - Hardware capability traits (sensors, drive, sprayer, buzzer, display)
//! - Line-following steering policy
//! - Encoder odometry and turn detection
//! - Spray trigger logic and plant counting
//! - Mission state machine and cycle runner

#![no_std]
#![deny(unsafe_code)]

pub mod alarm;
pub mod config;
pub mod line;
pub mod mission;
pub mod odometry;
pub mod spray;
pub mod state;
pub mod traits;
