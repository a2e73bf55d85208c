//! Mission configuration
//!
//! All thresholds and timings of the reference rover. These are compile-time
//! constants; [`MissionConfig`] bundles them so the core logic never reaches
//! for a global.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of plants to spray before the mission is complete
pub const PLANT_TARGET: u8 = 16;

/// Encoder tick difference above which a pivot (turn) is assumed
pub const TURN_TICK_THRESHOLD: u32 = 32;

/// Row distance between spray stops (distance units = averaged ticks)
pub const SPRAY_INTERVAL: u32 = 20;

/// Maximum spray stops in a single row
pub const MAX_STOPS_PER_ROW: u8 = 4;

/// Line sensor reading below which a sensor sees the line (0-255 scale)
pub const SENSOR_LOW: u8 = 0x08;

/// Line sensor reading above which a sensor sees the background (0-255 scale)
pub const SENSOR_HIGH: u8 = 0x10;

/// Sprayer valve open time per stop
pub const SPRAY_PULSE_MS: u32 = 3000;

/// Time spent driving off a spray stop before line following resumes
pub const ADVANCE_MS: u32 = 500;

/// Wheel speed used while driving off a spray stop
pub const ADVANCE_SPEED: u8 = 100;

/// Errors found while validating a [`MissionConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Plant target must be at least one
    ZeroPlantTarget,
    /// Spray interval must be at least one distance unit
    ZeroSprayInterval,
    /// At least one stop per row is required
    ZeroStopsPerRow,
    /// Low sensor threshold must be below the high threshold
    InvertedSensorThresholds,
}

/// Line sensor thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorThresholds {
    /// Below this the sensor is over the line
    pub low: u8,
    /// Above this the sensor is over the background
    pub high: u8,
}

impl Default for SensorThresholds {
    fn default() -> Self {
        Self {
            low: SENSOR_LOW,
            high: SENSOR_HIGH,
        }
    }
}

/// Complete mission configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MissionConfig {
    /// Plants to spray before stopping
    pub plant_target: u8,
    /// Tick difference that counts as a turn (strictly greater than)
    pub turn_tick_threshold: u32,
    /// Distance between spray stops
    pub spray_interval: u32,
    /// Maximum stops per row
    pub max_stops_per_row: u8,
    /// Line sensor thresholds
    pub thresholds: SensorThresholds,
    /// Sprayer pulse duration (ms)
    pub spray_pulse_ms: u32,
    /// Drive-off duration after spraying (ms)
    pub advance_ms: u32,
    /// Drive-off wheel speed
    pub advance_speed: u8,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            plant_target: PLANT_TARGET,
            turn_tick_threshold: TURN_TICK_THRESHOLD,
            spray_interval: SPRAY_INTERVAL,
            max_stops_per_row: MAX_STOPS_PER_ROW,
            thresholds: SensorThresholds::default(),
            spray_pulse_ms: SPRAY_PULSE_MS,
            advance_ms: ADVANCE_MS,
            advance_speed: ADVANCE_SPEED,
        }
    }
}

impl MissionConfig {
    /// Check the configuration for values the control logic cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plant_target == 0 {
            return Err(ConfigError::ZeroPlantTarget);
        }
        if self.spray_interval == 0 {
            return Err(ConfigError::ZeroSprayInterval);
        }
        if self.max_stops_per_row == 0 {
            return Err(ConfigError::ZeroStopsPerRow);
        }
        if self.thresholds.low >= self.thresholds.high {
            return Err(ConfigError::InvertedSensorThresholds);
        }
        Ok(())
    }
}
