//! Differential drive trait

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor direction command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DriveDirection {
    /// Both wheels driven forward
    Forward,
    /// Both H-bridges released
    #[default]
    Stop,
}

/// PWM duty for each wheel (0-255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WheelSpeeds {
    pub left: u8,
    pub right: u8,
}

impl WheelSpeeds {
    /// Both wheels stopped
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new speed pair
    pub const fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    /// Same speed on both wheels
    pub const fn straight(speed: u8) -> Self {
        Self::new(speed, speed)
    }
}

/// Two independently driven wheels sharing one direction command
pub trait DifferentialDrive {
    /// Apply wheel speeds and direction in one step
    fn set_drive(&mut self, speeds: WheelSpeeds, direction: DriveDirection);

    /// Drive forward at the given speeds
    fn forward(&mut self, speeds: WheelSpeeds) {
        self.set_drive(speeds, DriveDirection::Forward);
    }

    /// Hold forward direction with zero duty (motors braked by PWM)
    fn halt(&mut self) {
        self.set_drive(WheelSpeeds::ZERO, DriveDirection::Forward);
    }

    /// Release both motors
    fn stop(&mut self) {
        self.set_drive(WheelSpeeds::ZERO, DriveDirection::Stop);
    }
}
