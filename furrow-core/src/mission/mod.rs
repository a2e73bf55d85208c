//! Mission runner
//!
//! Ties the line follower, odometry and spray controller into the control
//! cycle and drives the board through the hardware traits.

pub mod runner;
pub mod status;

pub use runner::{CycleReport, Mission, MissionError};
pub use status::StatusScreen;
