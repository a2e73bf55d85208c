//! Composite board
//!
//! The mission runner wants one object that provides every capability.
//! [`Rover`] assembles it from separately constructed parts and forwards
//! each trait to the part that owns it.

use furrow_core::traits::{
    AnalogInput, Buzzer, CharDisplay, DifferentialDrive, DriveDirection, Sprayer, WheelSpeeds,
};

/// A board built from individual parts
pub struct Rover<A, M, S, B, D> {
    /// Line sensor and battery ADC
    pub adc: A,
    /// Differential drive
    pub drive: M,
    /// Sprayer valve
    pub sprayer: S,
    /// Alarm buzzer
    pub buzzer: B,
    /// Status display
    pub display: D,
}

impl<A, M, S, B, D> Rover<A, M, S, B, D> {
    /// Assemble a rover from its parts
    pub fn new(adc: A, drive: M, sprayer: S, buzzer: B, display: D) -> Self {
        Self {
            adc,
            drive,
            sprayer,
            buzzer,
            display,
        }
    }
}

impl<A: AnalogInput, M, S, B, D> AnalogInput for Rover<A, M, S, B, D> {
    fn analog_read(&mut self, channel: u8) -> u8 {
        self.adc.analog_read(channel)
    }
}

impl<A, M: DifferentialDrive, S, B, D> DifferentialDrive for Rover<A, M, S, B, D> {
    fn set_drive(&mut self, speeds: WheelSpeeds, direction: DriveDirection) {
        self.drive.set_drive(speeds, direction);
    }
}

impl<A, M, S: Sprayer, B, D> Sprayer for Rover<A, M, S, B, D> {
    fn sprayer_on(&mut self) {
        self.sprayer.sprayer_on();
    }

    fn sprayer_off(&mut self) {
        self.sprayer.sprayer_off();
    }
}

impl<A, M, S, B: Buzzer, D> Buzzer for Rover<A, M, S, B, D> {
    fn buzzer_on(&mut self) {
        self.buzzer.buzzer_on();
    }

    fn buzzer_off(&mut self) {
        self.buzzer.buzzer_off();
    }
}

impl<A, M, S, B, D: CharDisplay> CharDisplay for Rover<A, M, S, B, D> {
    fn write_text(&mut self, row: u8, col: u8, text: &str) {
        self.display.write_text(row, col, text);
    }
}
