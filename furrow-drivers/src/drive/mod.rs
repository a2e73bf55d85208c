//! Drive motor drivers

pub mod h_bridge;

pub use h_bridge::{HBridgeDrive, MotorChannel};
