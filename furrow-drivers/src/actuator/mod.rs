//! On/off actuator drivers

pub mod gpio;

pub use gpio::{GpioBuzzer, GpioSprayer};
