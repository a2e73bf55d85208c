//! Status display rendering

use crate::config::{DisplayField, DisplayLayout};
use crate::line::SensorReading;
use crate::spray::MissionProgress;
use crate::traits::{CharDisplay, DisplayExt};

/// Writes mission progress (and optionally raw sensor values) to the display
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusScreen {
    layout: DisplayLayout,
}

impl StatusScreen {
    /// Create a status screen with the given layout
    pub fn new(layout: DisplayLayout) -> Self {
        Self { layout }
    }

    /// Get the display layout
    pub fn layout(&self) -> &DisplayLayout {
        &self.layout
    }

    /// Check if the telemetry row is shown
    pub fn shows_telemetry(&self) -> bool {
        self.layout.telemetry.is_some()
    }

    /// Render the current status
    ///
    /// `battery` is only drawn when the layout has a telemetry row.
    pub fn render<D: CharDisplay + ?Sized>(
        &self,
        display: &mut D,
        progress: &MissionProgress,
        reading: &SensorReading,
        battery: u8,
    ) {
        write_field(display, &self.layout.plants, progress.plants_sprayed.into());

        if let Some(telemetry) = &self.layout.telemetry {
            write_field(display, &telemetry.left, reading.left.into());
            write_field(display, &telemetry.center, reading.center.into());
            write_field(display, &telemetry.right, reading.right.into());
            write_field(display, &telemetry.battery, battery.into());
        }
    }
}

fn write_field<D: CharDisplay + ?Sized>(display: &mut D, field: &DisplayField, value: u32) {
    display.write_number(field.row, field.col, value, field.width);
}
