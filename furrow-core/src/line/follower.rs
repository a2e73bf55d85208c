//! Priority-ordered steering policy
//!
//! Sensor values are on a 0-255 scale where a low value means the sensor is
//! over the reflective line. Rules are checked in a fixed order and the first
//! one that matches decides the wheel speeds; later rules never override an
//! earlier match. The one exception is the line-lost check, which wins over
//! everything because it can only hold when no sensor sees the line.

use crate::config::{SensorChannels, SensorThresholds};
use crate::traits::{AnalogInput, WheelSpeeds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wheel speeds for each steering rule
pub const STRAIGHT: WheelSpeeds = WheelSpeeds::new(120, 120);
pub const SHARP_RIGHT: WheelSpeeds = WheelSpeeds::new(120, 50);
pub const SHARP_LEFT: WheelSpeeds = WheelSpeeds::new(50, 120);
pub const GENTLE_LEFT: WheelSpeeds = WheelSpeeds::new(40, 100);
pub const GENTLE_RIGHT: WheelSpeeds = WheelSpeeds::new(100, 40);

/// One sample of the three line sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorReading {
    pub left: u8,
    pub center: u8,
    pub right: u8,
}

impl SensorReading {
    /// Create a reading from raw values
    pub const fn new(left: u8, center: u8, right: u8) -> Self {
        Self {
            left,
            center,
            right,
        }
    }

    /// Sample all three sensors, left first
    pub fn sample<A: AnalogInput + ?Sized>(adc: &mut A, channels: &SensorChannels) -> Self {
        let left = adc.analog_read(channels.left);
        let center = adc.analog_read(channels.center);
        let right = adc.analog_read(channels.right);
        Self::new(left, center, right)
    }
}

/// Which rule produced a drive command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SteeringRule {
    /// Center sensor on the line
    Straight,
    /// Left sensor well off the line, swing right
    SharpRight,
    /// Right sensor well off the line, swing left
    SharpLeft,
    /// Right sensor drifting, left sensor on the line
    GentleLeft,
    /// Left sensor drifting, right sensor on the line
    GentleRight,
}

impl SteeringRule {
    /// Wheel speeds commanded by this rule
    pub const fn speeds(self) -> WheelSpeeds {
        match self {
            SteeringRule::Straight => STRAIGHT,
            SteeringRule::SharpRight => SHARP_RIGHT,
            SteeringRule::SharpLeft => SHARP_LEFT,
            SteeringRule::GentleLeft => GENTLE_LEFT,
            SteeringRule::GentleRight => GENTLE_RIGHT,
        }
    }
}

/// Outcome of one steering decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Steering {
    /// Drive forward with the rule's wheel speeds
    Drive(SteeringRule),
    /// No rule matched; keep the previous wheel command
    Hold,
    /// Every sensor is off the line
    Lost,
}

impl Steering {
    /// Wheel speeds to apply, `None` when the previous command is kept
    pub fn speeds(&self) -> Option<WheelSpeeds> {
        match self {
            Steering::Drive(rule) => Some(rule.speeds()),
            Steering::Hold => None,
            Steering::Lost => Some(WheelSpeeds::ZERO),
        }
    }

    /// Check if the line was lost
    pub fn is_lost(&self) -> bool {
        matches!(self, Steering::Lost)
    }
}

/// Line-following steering policy
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFollower {
    thresholds: SensorThresholds,
}

impl LineFollower {
    /// Create a follower with the given sensor thresholds
    pub fn new(thresholds: SensorThresholds) -> Self {
        Self { thresholds }
    }

    /// Get the sensor thresholds
    pub fn thresholds(&self) -> SensorThresholds {
        self.thresholds
    }

    /// Decide wheel speeds for a sensor reading
    pub fn compute_velocity(&self, reading: SensorReading) -> Steering {
        let SensorThresholds { low, high } = self.thresholds;
        let SensorReading {
            left,
            center,
            right,
        } = reading;

        if left > high && center > high && right > high {
            return Steering::Lost;
        }

        let drifting = |value: u8| value >= low && value < high;

        let rule = if center < low {
            SteeringRule::Straight
        } else if left > high {
            SteeringRule::SharpRight
        } else if right > high {
            SteeringRule::SharpLeft
        } else if drifting(right) && left < low {
            SteeringRule::GentleLeft
        } else if drifting(left) && right < low {
            SteeringRule::GentleRight
        } else {
            return Steering::Hold;
        };

        Steering::Drive(rule)
    }
}
