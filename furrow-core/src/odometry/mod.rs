//! Encoder odometry
//!
//! Converts raw wheel encoder ticks into row distance, sidewise distance
//! and a turn count.

pub mod counters;
pub mod tracker;

pub use counters::{EncoderCounters, TickCounts};
pub use tracker::{Odometry, OdometryUpdate, RowState};
