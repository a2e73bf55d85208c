//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic and the
//! board. Every capability is infallible: the reference hardware has no
//! fault reporting and the control logic invents none.

pub mod actuator;
pub mod display;
pub mod drive;
pub mod sensor;

pub use actuator::{Buzzer, Sprayer};
pub use display::{CharDisplay, DisplayExt};
pub use drive::{DifferentialDrive, DriveDirection, WheelSpeeds};
pub use sensor::AnalogInput;

/// Everything the mission runner needs from the board, in one object
///
/// Implemented automatically for any type that provides all capabilities,
/// so boards and test fakes only implement the individual traits.
pub trait HardwareIo: AnalogInput + DifferentialDrive + Sprayer + Buzzer + CharDisplay {}

impl<T: AnalogInput + DifferentialDrive + Sprayer + Buzzer + CharDisplay> HardwareIo for T {}
