//! GPIO driven sprayer valve and buzzer
//!
//! Both are a single output pin, optionally active-low.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use furrow_core::traits::{Buzzer, Sprayer};

use crate::infallible;

/// A switched output with polarity
struct SwitchedOutput<P> {
    pin: P,
    active_low: bool,
    on: bool,
}

impl<P: OutputPin<Error = Infallible>> SwitchedOutput<P> {
    fn new(pin: P, active_low: bool) -> Self {
        let mut output = Self {
            pin,
            active_low,
            on: true,
        };
        output.set(false);
        output
    }

    fn set(&mut self, on: bool) {
        infallible(self.pin.set_state((on != self.active_low).into()));
        self.on = on;
    }
}

/// Sprayer valve on a GPIO pin
pub struct GpioSprayer<P> {
    output: SwitchedOutput<P>,
}

impl<P: OutputPin<Error = Infallible>> GpioSprayer<P> {
    /// Create a sprayer on an active-high pin (starts closed)
    pub fn new(pin: P) -> Self {
        Self {
            output: SwitchedOutput::new(pin, false),
        }
    }

    /// Create a sprayer on an active-low pin (starts closed)
    pub fn active_low(pin: P) -> Self {
        Self {
            output: SwitchedOutput::new(pin, true),
        }
    }

    /// Check if the valve is open
    pub fn is_spraying(&self) -> bool {
        self.output.on
    }

    /// Release the pin
    pub fn free(self) -> P {
        self.output.pin
    }
}

impl<P: OutputPin<Error = Infallible>> Sprayer for GpioSprayer<P> {
    fn sprayer_on(&mut self) {
        self.output.set(true);
    }

    fn sprayer_off(&mut self) {
        self.output.set(false);
    }
}

/// Buzzer on a GPIO pin
pub struct GpioBuzzer<P> {
    output: SwitchedOutput<P>,
}

impl<P: OutputPin<Error = Infallible>> GpioBuzzer<P> {
    /// Create a buzzer on an active-high pin (starts silent)
    pub fn new(pin: P) -> Self {
        Self {
            output: SwitchedOutput::new(pin, false),
        }
    }

    /// Create a buzzer on an active-low pin (starts silent)
    pub fn active_low(pin: P) -> Self {
        Self {
            output: SwitchedOutput::new(pin, true),
        }
    }

    /// Check if the buzzer is sounding
    pub fn is_sounding(&self) -> bool {
        self.output.on
    }

    /// Release the pin
    pub fn free(self) -> P {
        self.output.pin
    }
}

impl<P: OutputPin<Error = Infallible>> Buzzer for GpioBuzzer<P> {
    fn buzzer_on(&mut self) {
        self.output.set(true);
    }

    fn buzzer_off(&mut self) {
        self.output.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct Pin {
        high: bool,
    }

    impl ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_sprayer_starts_closed() {
        let sprayer = GpioSprayer::new(Pin { high: true });
        assert!(!sprayer.is_spraying());
        assert!(!sprayer.free().high);
    }

    #[test]
    fn test_sprayer_pulse() {
        let mut sprayer = GpioSprayer::new(Pin::default());
        sprayer.sprayer_on();
        assert!(sprayer.is_spraying());
        sprayer.sprayer_off();
        assert!(!sprayer.is_spraying());
        assert!(!sprayer.free().high);
    }

    #[test]
    fn test_active_low_buzzer() {
        let mut buzzer = GpioBuzzer::active_low(Pin::default());
        // Silent means the pin idles high
        assert!(!buzzer.is_sounding());

        buzzer.buzzer_on();
        assert!(buzzer.is_sounding());
        assert!(!buzzer.free().high);
    }
}
