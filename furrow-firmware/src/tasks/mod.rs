//! Embassy async tasks
//!
//! The encoder tasks count wheel ticks into the shared counters; the mission
//! task owns the rest of the board and runs the control cycle.

pub mod encoder;
pub mod mission;

pub use encoder::{encoder_task, Wheel};
pub use mission::mission_task;
