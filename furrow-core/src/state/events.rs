//! Events that trigger state transitions

/// Events produced by the control cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A cycle finished with the rover still on the line and work left
    CycleCompleted,
    /// All three line sensors are off the line
    LineLost,
    /// The plant target has been reached
    TargetReached,
}

impl Event {
    /// Check if this event ends the mission
    pub fn is_terminal_event(&self) -> bool {
        matches!(self, Event::LineLost | Event::TargetReached)
    }
}
