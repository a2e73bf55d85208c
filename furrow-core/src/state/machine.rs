//! State machine definition

use super::events::Event;

/// Mission states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Following the line and spraying
    #[default]
    Running,
    /// Line lost; fail-stop, needs an external reset
    Lost,
    /// Plant target reached, rover stopped
    Done,
}

impl State {
    /// Check if the drive motors may run
    pub fn motor_allowed(&self) -> bool {
        matches!(self, State::Running)
    }

    /// Check if this is a fault state
    pub fn is_error(&self) -> bool {
        matches!(self, State::Lost)
    }

    /// Check if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Lost | State::Done)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Running, CycleCompleted) => Running,
            (Running, LineLost) => Lost,
            (Running, TargetReached) => Done,

            // Terminal states ignore everything
            (Lost, _) | (Done, _) => self,
        }
    }
}
