//! Analog sensor input

/// Blocking 8-bit analog input
pub trait AnalogInput {
    /// Sample a channel (0-15) and return the reading scaled to 0-255
    ///
    /// Blocks until the conversion completes.
    fn analog_read(&mut self, channel: u8) -> u8;
}
