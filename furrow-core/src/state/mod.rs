//! Mission state machine
//!
//! The rover is either running, or stopped for good: done spraying, or off
//! the line. Neither terminal state can be left without an external reset.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
