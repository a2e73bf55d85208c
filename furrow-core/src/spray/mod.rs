//! Spray scheduling
//!
//! Decides when to stop and spray, counts plants, and owns the mission
//! completion condition.

pub mod controller;

pub use controller::{
    MissionProgress, SprayAction, SprayController, SprayDecision, SprayStep, SprayStop,
};
