//! Furrow - Row-Spraying Rover Firmware
//!
//! Main firmware binary for RP2040-based line-following sprayer rovers.
//! The rover follows a guide line down each crop row, stops at fixed
//! intervals to spray, crosses to the next row, and parks once the plant
//! target is reached.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use {defmt_rtt as _, panic_probe as _};

use furrow_core::config::MissionConfig;
use furrow_drivers::actuator::{GpioBuzzer, GpioSprayer};
use furrow_drivers::drive::{HBridgeDrive, MotorChannel};
use furrow_drivers::rover::Rover;

use crate::board::{ClampedPwm, LogDisplay, RpAnalog, PWM_TOP};
use crate::tasks::Wheel;

mod board;
mod channels;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Furrow firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = MissionConfig::default();
    unwrap!(config.validate());

    // Line sensors and battery monitor, in analog channel order
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let analog = RpAnalog::new(
        adc,
        [
            Channel::new_pin(p.PIN_29, Pull::None), // 0: battery
            Channel::new_pin(p.PIN_28, Pull::None), // 1: right sensor
            Channel::new_pin(p.PIN_27, Pull::None), // 2: center sensor
            Channel::new_pin(p.PIN_26, Pull::None), // 3: left sensor
        ],
    );

    // Both wheel enables share PWM slice 0
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;
    let (left_pwm, right_pwm) =
        Pwm::new_output_ab(p.PWM_SLICE0, p.PIN_16, p.PIN_17, pwm_config).split();

    let left = MotorChannel::new(
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_19, Level::Low),
        ClampedPwm::new(unwrap!(left_pwm)),
    )
    .mirrored();
    let right = MotorChannel::new(
        Output::new(p.PIN_20, Level::Low),
        Output::new(p.PIN_21, Level::Low),
        ClampedPwm::new(unwrap!(right_pwm)),
    );
    let drive = HBridgeDrive::new(left, right);
    info!("Drive initialized (PWM top {})", PWM_TOP);

    let sprayer = GpioSprayer::new(Output::new(p.PIN_14, Level::Low));
    let buzzer = GpioBuzzer::new(Output::new(p.PIN_15, Level::Low));

    let board = Rover::new(analog, drive, sprayer, buzzer, LogDisplay::new());

    // Encoders pull low once per tick
    let left_encoder = Input::new(p.PIN_10, Pull::Up);
    let right_encoder = Input::new(p.PIN_11, Pull::Up);

    spawner
        .spawn(tasks::encoder_task(left_encoder, Wheel::Left))
        .unwrap();
    spawner
        .spawn(tasks::encoder_task(right_encoder, Wheel::Right))
        .unwrap();
    spawner.spawn(tasks::mission_task(board, config)).unwrap();

    info!("All tasks spawned, firmware running");
}
