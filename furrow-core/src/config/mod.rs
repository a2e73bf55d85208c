//! Configuration types
//!
//! The reference behavior is fixed at compile time; [`MissionConfig`]
//! carries those values so tests and boards can pass them around explicitly.

pub mod hardware;
pub mod mission;

pub use hardware::*;
pub use mission::*;
