//! Line following
//!
//! Maps the three white-line sensor readings to differential wheel speeds.

pub mod follower;

pub use follower::{LineFollower, SensorReading, Steering, SteeringRule};
