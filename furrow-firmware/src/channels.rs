//! Shared state between Embassy tasks
//!
//! The encoder tasks and the mission task share the wheel tick counters.
//! Statics so the tasks can borrow them for `'static`.

use furrow_core::odometry::EncoderCounters;

/// Wheel tick counters, incremented by the encoder tasks
pub static ENCODERS: EncoderCounters = EncoderCounters::new();
