//! Spray trigger state machine
//!
//! A stop is triggered when the row distance lands on a nonzero multiple of
//! the spray interval, the row still has stops left, and the rover has not
//! already sprayed at this distance. The last condition keeps consecutive
//! cycles at the same distance from spraying twice.
//!
//! The first row is a double-width pass, so each stop there treats two
//! plants. Every later stop treats one.

use crate::config::MissionConfig;
use crate::odometry::RowState;
use crate::traits::WheelSpeeds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Plants treated by a stop in the first row
pub const FIRST_ROW_PLANTS_PER_STOP: u8 = 2;

/// Plants treated by a stop in any later row
pub const PLANTS_PER_STOP: u8 = 1;

/// Mission-wide spray progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MissionProgress {
    /// Plants sprayed since mission start (never decreases)
    pub plants_sprayed: u8,
}

/// One step of the spray stop sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SprayStep {
    /// Zero both wheel speeds
    Halt,
    /// Open the sprayer valve
    SprayerOn,
    /// Close the sprayer valve
    SprayerOff,
    /// Drive forward at the given speeds
    Advance(WheelSpeeds),
    /// Block for the given number of milliseconds
    Wait(u32),
}

/// A planned spray stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SprayStop {
    /// Row distance at which the stop was triggered
    pub distance: u32,
    /// Valve open time (ms)
    pub pulse_ms: u32,
    /// Drive-off speeds after spraying
    pub advance: WheelSpeeds,
    /// Drive-off time (ms)
    pub advance_ms: u32,
    /// Plants credited for this stop
    pub plants: u8,
}

impl SprayStop {
    /// Actuator sequence for this stop, in execution order
    pub fn steps(&self) -> [SprayStep; 6] {
        [
            SprayStep::Halt,
            SprayStep::SprayerOn,
            SprayStep::Wait(self.pulse_ms),
            SprayStep::SprayerOff,
            SprayStep::Advance(self.advance),
            SprayStep::Wait(self.advance_ms),
        ]
    }
}

/// What the spray controller wants done this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SprayAction {
    /// Keep following the line
    Continue,
    /// Stop and spray
    Spray(SprayStop),
    /// Plant target reached, stop the rover
    Finish,
}

/// Spray controller output for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SprayDecision {
    pub action: SprayAction,
    pub row: RowState,
    pub progress: MissionProgress,
}

/// Spray trigger logic
#[derive(Debug, Clone, Copy)]
pub struct SprayController {
    spray_interval: u32,
    max_stops_per_row: u8,
    plant_target: u8,
    pulse_ms: u32,
    advance: WheelSpeeds,
    advance_ms: u32,
}

impl Default for SprayController {
    fn default() -> Self {
        Self::new(&MissionConfig::default())
    }
}

impl SprayController {
    /// Create a controller from the mission configuration
    pub fn new(config: &MissionConfig) -> Self {
        Self {
            spray_interval: config.spray_interval,
            max_stops_per_row: config.max_stops_per_row,
            plant_target: config.plant_target,
            pulse_ms: config.spray_pulse_ms,
            advance: WheelSpeeds::straight(config.advance_speed),
            advance_ms: config.advance_ms,
        }
    }

    /// Get the plant target
    pub fn plant_target(&self) -> u8 {
        self.plant_target
    }

    /// Check if the mission has sprayed enough plants
    pub fn is_complete(&self, progress: &MissionProgress) -> bool {
        progress.plants_sprayed >= self.plant_target
    }

    /// Check if the row state calls for a spray stop
    pub fn should_trigger(&self, row: &RowState) -> bool {
        let distance = row.distance_in_row;
        distance != 0
            && self.spray_interval != 0
            && distance % self.spray_interval == 0
            && row.stops_in_row < self.max_stops_per_row
            && distance != row.sprayed_distance
    }

    /// Plants credited for a stop at the given row state
    pub fn plants_for_stop(&self, row: &RowState) -> u8 {
        if row.in_first_row() {
            FIRST_ROW_PLANTS_PER_STOP
        } else {
            PLANTS_PER_STOP
        }
    }

    /// Decide this cycle's spray action and the resulting state
    pub fn tick(&self, row: RowState, progress: MissionProgress) -> SprayDecision {
        if self.is_complete(&progress) {
            return SprayDecision {
                action: SprayAction::Finish,
                row,
                progress,
            };
        }

        if !self.should_trigger(&row) {
            return SprayDecision {
                action: SprayAction::Continue,
                row,
                progress,
            };
        }

        let plants = self.plants_for_stop(&row);
        let stop = SprayStop {
            distance: row.distance_in_row,
            pulse_ms: self.pulse_ms,
            advance: self.advance,
            advance_ms: self.advance_ms,
            plants,
        };

        let row = RowState {
            sprayed_distance: row.distance_in_row,
            stops_in_row: row.stops_in_row.saturating_add(1),
            ..row
        };
        let progress = MissionProgress {
            plants_sprayed: progress.plants_sprayed.saturating_add(plants),
        };

        SprayDecision {
            action: SprayAction::Spray(stop),
            row,
            progress,
        }
    }
}
