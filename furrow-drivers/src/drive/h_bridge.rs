//! H-bridge differential drive
//!
//! Each wheel has two direction inputs and one PWM enable. Forward drives
//! IN1 high and IN2 low; a mirrored motor swaps the two. Stop pulls both
//! inputs low so the bridge lets the motor coast.
//!
//! Wheel speeds are on the 0-255 scale and map linearly onto the PWM
//! channel's duty range.
//!
//! # Usage
//!
//! ```ignore
//! let left = MotorChannel::new(l_in1, l_in2, l_pwm).mirrored();
//! let right = MotorChannel::new(r_in1, r_in2, r_pwm);
//! let mut drive = HBridgeDrive::new(left, right);
//! drive.forward(WheelSpeeds::new(120, 120));
//! ```

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use furrow_core::traits::{DifferentialDrive, DriveDirection, WheelSpeeds};

use crate::infallible;

/// Full-scale wheel speed
pub const MAX_SPEED: u16 = u8::MAX as u16;

/// One wheel: two direction pins and a PWM channel
pub struct MotorChannel<A, B, P> {
    in1: A,
    in2: B,
    pwm: P,
    mirrored: bool,
    direction: DriveDirection,
    speed: u8,
}

impl<A, B, P> MotorChannel<A, B, P>
where
    A: OutputPin<Error = Infallible>,
    B: OutputPin<Error = Infallible>,
    P: SetDutyCycle<Error = Infallible>,
{
    /// Create a channel, released and at zero duty
    pub fn new(in1: A, in2: B, pwm: P) -> Self {
        let mut channel = Self {
            in1,
            in2,
            pwm,
            mirrored: false,
            direction: DriveDirection::Stop,
            speed: 0,
        };
        channel.set_direction(DriveDirection::Stop);
        channel.set_speed(0);
        channel
    }

    /// Swap the direction inputs for a motor mounted the other way round
    pub fn mirrored(mut self) -> Self {
        self.mirrored = !self.mirrored;
        let direction = self.direction;
        self.set_direction(direction);
        self
    }

    /// Set the bridge direction
    pub fn set_direction(&mut self, direction: DriveDirection) {
        let (in1_high, in2_high) = match direction {
            DriveDirection::Forward if self.mirrored => (false, true),
            DriveDirection::Forward => (true, false),
            DriveDirection::Stop => (false, false),
        };

        infallible(self.in1.set_state(in1_high.into()));
        infallible(self.in2.set_state(in2_high.into()));
        self.direction = direction;
    }

    /// Set the PWM duty from a 0-255 speed
    pub fn set_speed(&mut self, speed: u8) {
        infallible(self.pwm.set_duty_cycle_fraction(u16::from(speed), MAX_SPEED));
        self.speed = speed;
    }

    /// Get the last commanded direction
    pub fn direction(&self) -> DriveDirection {
        self.direction
    }

    /// Get the last commanded speed
    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Release the pins and PWM channel
    pub fn free(self) -> (A, B, P) {
        (self.in1, self.in2, self.pwm)
    }
}

/// Two-wheel differential drive
pub struct HBridgeDrive<L, R> {
    left: L,
    right: R,
}

impl<LA, LB, LP, RA, RB, RP> HBridgeDrive<MotorChannel<LA, LB, LP>, MotorChannel<RA, RB, RP>>
where
    LA: OutputPin<Error = Infallible>,
    LB: OutputPin<Error = Infallible>,
    LP: SetDutyCycle<Error = Infallible>,
    RA: OutputPin<Error = Infallible>,
    RB: OutputPin<Error = Infallible>,
    RP: SetDutyCycle<Error = Infallible>,
{
    /// Create a drive from two motor channels
    pub fn new(left: MotorChannel<LA, LB, LP>, right: MotorChannel<RA, RB, RP>) -> Self {
        Self { left, right }
    }

    /// Get the left wheel channel
    pub fn left(&self) -> &MotorChannel<LA, LB, LP> {
        &self.left
    }

    /// Get the right wheel channel
    pub fn right(&self) -> &MotorChannel<RA, RB, RP> {
        &self.right
    }

    /// Release both channels
    pub fn free(self) -> (MotorChannel<LA, LB, LP>, MotorChannel<RA, RB, RP>) {
        (self.left, self.right)
    }
}

impl<LA, LB, LP, RA, RB, RP> DifferentialDrive
    for HBridgeDrive<MotorChannel<LA, LB, LP>, MotorChannel<RA, RB, RP>>
where
    LA: OutputPin<Error = Infallible>,
    LB: OutputPin<Error = Infallible>,
    LP: SetDutyCycle<Error = Infallible>,
    RA: OutputPin<Error = Infallible>,
    RB: OutputPin<Error = Infallible>,
    RP: SetDutyCycle<Error = Infallible>,
{
    fn set_drive(&mut self, speeds: WheelSpeeds, direction: DriveDirection) {
        self.left.set_direction(direction);
        self.right.set_direction(direction);
        self.left.set_speed(speeds.left);
        self.right.set_speed(speeds.right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType as PinErrorType;
    use embedded_hal::pwm::ErrorType as PwmErrorType;

    #[derive(Default)]
    struct Pin {
        high: bool,
    }

    impl PinErrorType for Pin {
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

    struct Pwm {
        max: u16,
        duty: u16,
    }

    impl Pwm {
        fn new(max: u16) -> Self {
            Self { max, duty: max }
        }
    }

    impl PwmErrorType for Pwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for Pwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    fn channel(max: u16) -> MotorChannel<Pin, Pin, Pwm> {
        MotorChannel::new(Pin::default(), Pin::default(), Pwm::new(max))
    }

    #[test]
    fn test_new_channel_is_released() {
        let (in1, in2, pwm) = channel(255).free();
        assert!(!in1.high);
        assert!(!in2.high);
        assert_eq!(pwm.duty, 0);
    }

    #[test]
    fn test_forward_levels() {
        let mut normal = channel(255);
        normal.set_direction(DriveDirection::Forward);
        let (in1, in2, _) = normal.free();
        assert!(in1.high && !in2.high);

        let mut mirrored = channel(255).mirrored();
        mirrored.set_direction(DriveDirection::Forward);
        let (in1, in2, _) = mirrored.free();
        assert!(!in1.high && in2.high);
    }

    #[test]
    fn test_speed_scaling() {
        let mut full_scale = channel(255);
        full_scale.set_speed(120);
        assert_eq!(full_scale.free().2.duty, 120);

        let mut wide = channel(1000);
        wide.set_speed(255);
        assert_eq!(wide.speed(), 255);
        assert_eq!(wide.free().2.duty, 1000);
    }

    #[test]
    fn test_differential_drive() {
        let mut drive = HBridgeDrive::new(channel(255).mirrored(), channel(255));

        drive.forward(WheelSpeeds::new(120, 50));
        assert_eq!(drive.left().direction(), DriveDirection::Forward);
        assert_eq!(drive.left().speed(), 120);
        assert_eq!(drive.right().speed(), 50);

        drive.halt();
        assert_eq!(drive.left().direction(), DriveDirection::Forward);
        assert_eq!(drive.left().speed(), 0);

        drive.stop();
        let (left, right) = drive.free();
        let (l1, l2, lp) = left.free();
        let (r1, r2, rp) = right.free();
        assert!(!l1.high && !l2.high && !r1.high && !r2.high);
        assert_eq!((lp.duty, rp.duty), (0, 0));
    }
}
