//! Hardware configuration types
//!
//! Analog channel assignments and the status display layout.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest analog channel number a board may expose
pub const MAX_ANALOG_CHANNEL: u8 = 15;

/// Analog channel assignment for the line sensors and battery monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorChannels {
    /// Left white-line sensor
    pub left: u8,
    /// Center white-line sensor
    pub center: u8,
    /// Right white-line sensor
    pub right: u8,
    /// Battery voltage divider
    pub battery: u8,
}

impl Default for SensorChannels {
    /// Channel layout of the reference sensor board
    fn default() -> Self {
        Self {
            left: 3,
            center: 2,
            right: 1,
            battery: 0,
        }
    }
}

impl SensorChannels {
    /// Check every channel is addressable
    pub fn is_valid(&self) -> bool {
        [self.left, self.center, self.right, self.battery]
            .iter()
            .all(|&ch| ch <= MAX_ANALOG_CHANNEL)
    }
}

/// A numeric field on the character display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayField {
    /// Display row (1-based)
    pub row: u8,
    /// Display column (1-based)
    pub col: u8,
    /// Number of digits, zero padded
    pub width: u8,
}

impl DisplayField {
    /// Create a new field
    pub const fn new(row: u8, col: u8, width: u8) -> Self {
        Self { row, col, width }
    }
}

/// Placement of the mission status on the character display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayLayout {
    /// Plants sprayed so far
    pub plants: DisplayField,
    /// Raw line sensor and battery values, if shown
    pub telemetry: Option<TelemetryLayout>,
}

/// Placement of the raw sensor values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetryLayout {
    pub left: DisplayField,
    pub center: DisplayField,
    pub right: DisplayField,
    pub battery: DisplayField,
}

impl Default for TelemetryLayout {
    fn default() -> Self {
        Self {
            left: DisplayField::new(2, 1, 3),
            center: DisplayField::new(2, 5, 3),
            right: DisplayField::new(2, 9, 3),
            battery: DisplayField::new(2, 13, 3),
        }
    }
}

impl Default for DisplayLayout {
    /// Plant count only, first row first column, four digits
    fn default() -> Self {
        Self {
            plants: DisplayField::new(1, 1, 4),
            telemetry: None,
        }
    }
}

impl DisplayLayout {
    /// Default layout with the sensor telemetry row enabled
    pub fn with_telemetry() -> Self {
        Self {
            telemetry: Some(TelemetryLayout::default()),
            ..Self::default()
        }
    }
}
