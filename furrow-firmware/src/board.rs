//! RP2040 board bindings
//!
//! Pin map (Raspberry Pi Pico):
//!
//! | Function            | GPIO | Notes                       |
//! |---------------------|------|-----------------------------|
//! | Left line sensor    | 26   | ADC0, analog channel 3      |
//! | Center line sensor  | 27   | ADC1, analog channel 2      |
//! | Right line sensor   | 28   | ADC2, analog channel 1      |
//! | Battery monitor     | 29   | ADC3 (VSYS/3), channel 0    |
//! | Left encoder        | 10   | Pull-up, falling edge       |
//! | Right encoder       | 11   | Pull-up, falling edge       |
//! | Sprayer valve       | 14   | Active high                 |
//! | Buzzer              | 15   | Active high                 |
//! | Left motor PWM      | 16   | PWM slice 0 A               |
//! | Right motor PWM     | 17   | PWM slice 0 B               |
//! | Left motor IN1/IN2  | 18/19| Mirrored mounting           |
//! | Right motor IN1/IN2 | 20/21|                             |

use core::convert::Infallible;

use defmt::*;
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use heapless::{String, Vec};

use furrow_core::traits::display::MAX_FIELD_WIDTH;
use furrow_core::traits::{AnalogInput, CharDisplay};
use furrow_drivers::actuator::{GpioBuzzer, GpioSprayer};
use furrow_drivers::drive::{HBridgeDrive, MotorChannel};
use furrow_drivers::rover::Rover;

/// Number of wired analog channels
pub const ANALOG_CHANNELS: usize = 4;

/// PWM counter top; 125 MHz / 5000 = 25 kHz, above the audible range
pub const PWM_TOP: u16 = 4999;

/// Value reported for a channel that is not wired or failed to convert
///
/// Above the line-lost threshold, so a dead ADC ends the mission as lost.
const FAULT_READING: u8 = u8::MAX;

/// One wheel of the H-bridge
pub type Motor = MotorChannel<Output<'static>, Output<'static>, ClampedPwm>;

/// The complete rover board
pub type Board = Rover<
    RpAnalog,
    HBridgeDrive<Motor, Motor>,
    GpioSprayer<Output<'static>>,
    GpioBuzzer<Output<'static>>,
    LogDisplay,
>;

/// Analog inputs on the RP2040 ADC
///
/// Analog channel `n` is the `n`-th entry of the channel table. Samples are
/// 12-bit and reduced to the 0-255 scale.
pub struct RpAnalog {
    adc: Adc<'static, Blocking>,
    channels: [Channel<'static>; ANALOG_CHANNELS],
}

impl RpAnalog {
    pub fn new(adc: Adc<'static, Blocking>, channels: [Channel<'static>; ANALOG_CHANNELS]) -> Self {
        Self { adc, channels }
    }
}

impl AnalogInput for RpAnalog {
    fn analog_read(&mut self, channel: u8) -> u8 {
        let Some(input) = self.channels.get_mut(usize::from(channel)) else {
            warn!("Analog channel {} is not wired", channel);
            return FAULT_READING;
        };

        match self.adc.blocking_read(input) {
            Ok(raw) => (raw >> 4) as u8,
            Err(e) => {
                warn!("ADC read on channel {} failed: {:?}", channel, e);
                FAULT_READING
            }
        }
    }
}

/// PWM output that clamps the duty instead of rejecting it
pub struct ClampedPwm(PwmOutput<'static>);

impl ClampedPwm {
    pub fn new(output: PwmOutput<'static>) -> Self {
        Self(output)
    }
}

impl ErrorType for ClampedPwm {
    type Error = Infallible;
}

impl SetDutyCycle for ClampedPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.0.max_duty_cycle()
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        let duty = duty.min(self.0.max_duty_cycle());
        // In range after the clamp
        let _ = self.0.set_duty_cycle(duty);
        Ok(())
    }
}

/// Maximum number of display fields tracked
const MAX_FIELDS: usize = 8;

/// Character display that prints fields to the defmt log
///
/// Only changed fields are logged, so a display refreshed every cycle does
/// not flood the probe link.
#[derive(Default)]
pub struct LogDisplay {
    fields: Vec<(u8, u8, String<{ MAX_FIELD_WIDTH as usize }>), MAX_FIELDS>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn changed(&mut self, row: u8, col: u8, text: &str) -> bool {
        let mut value = String::new();
        // Fields wider than a status field are logged but not tracked
        if value.push_str(text).is_err() {
            return true;
        }

        match self.fields.iter_mut().find(|(r, c, _)| *r == row && *c == col) {
            Some((_, _, last)) if *last == value => false,
            Some((_, _, last)) => {
                *last = value;
                true
            }
            None => {
                let _ = self.fields.push((row, col, value));
                true
            }
        }
    }
}

impl CharDisplay for LogDisplay {
    fn write_text(&mut self, row: u8, col: u8, text: &str) {
        if self.changed(row, col, text) {
            info!("LCD [{},{}] {}", row, col, text);
        }
    }
}
