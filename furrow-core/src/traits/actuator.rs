//! On/off actuators: sprayer valve and buzzer

/// Sprayer valve or pump
pub trait Sprayer {
    /// Open the valve
    fn sprayer_on(&mut self);

    /// Close the valve
    fn sprayer_off(&mut self);
}

/// Audible alarm
pub trait Buzzer {
    /// Start sounding
    fn buzzer_on(&mut self);

    /// Stop sounding
    fn buzzer_off(&mut self);
}
