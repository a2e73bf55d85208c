//! Control cycle
//!
//! Every cycle runs the same fixed sequence:
//!
//! 1. Sample the line sensors and steer (may end the mission as lost)
//! 2. Update odometry from the shared encoder counters
//! 3. Let the spray controller decide on a stop, and execute it
//! 4. Refresh the status display
//! 5. Stop the rover once the plant target is reached
//!
//! The delay is async so a board running on an executor keeps servicing the
//! encoder tasks during the spray pulse. The cycle itself is strictly
//! sequential.

use embedded_hal_async::delay::DelayNs;

use crate::config::{DisplayLayout, MissionConfig, SensorChannels};
use crate::line::{LineFollower, SensorReading, Steering};
use crate::odometry::{EncoderCounters, Odometry, RowState};
use crate::spray::{MissionProgress, SprayAction, SprayController, SprayStep, SprayStop};
use crate::state::{Event, State};
use crate::traits::HardwareIo;

use super::status::StatusScreen;

/// Errors from the mission runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MissionError {
    /// A cycle was requested after the mission ended
    AlreadyTerminated(State),
}

/// Summary of one control cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Line sensor sample used for steering
    pub reading: SensorReading,
    /// Steering decision
    pub steering: Steering,
    /// Odometry detected a turn this cycle
    pub turn_detected: bool,
    /// Spray controller decision
    pub action: SprayAction,
    /// Row state at the end of the cycle
    pub row: RowState,
    /// Mission progress at the end of the cycle
    pub progress: MissionProgress,
    /// State at the end of the cycle
    pub state: State,
}

/// A spraying mission on a particular board
pub struct Mission<'a, H, D> {
    hw: H,
    delay: D,
    counters: &'a EncoderCounters,
    channels: SensorChannels,
    follower: LineFollower,
    odometry: Odometry,
    sprayer: SprayController,
    screen: StatusScreen,
    state: State,
    row: RowState,
    progress: MissionProgress,
}

impl<'a, H, D> Mission<'a, H, D>
where
    H: HardwareIo,
    D: DelayNs,
{
    /// Create a mission at its starting state
    ///
    /// `counters` is the encoder resource the board's tick source writes to.
    pub fn new(hw: H, delay: D, counters: &'a EncoderCounters, config: MissionConfig) -> Self {
        Self {
            hw,
            delay,
            counters,
            channels: SensorChannels::default(),
            follower: LineFollower::new(config.thresholds),
            odometry: Odometry::new(config.turn_tick_threshold),
            sprayer: SprayController::new(&config),
            screen: StatusScreen::default(),
            state: State::Running,
            row: RowState::default(),
            progress: MissionProgress::default(),
        }
    }

    /// Use a different analog channel assignment
    pub fn with_channels(mut self, channels: SensorChannels) -> Self {
        self.channels = channels;
        self
    }

    /// Use a different status display layout
    pub fn with_layout(mut self, layout: DisplayLayout) -> Self {
        self.screen = StatusScreen::new(layout);
        self
    }

    /// Get the current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Get the current row state
    pub fn row(&self) -> &RowState {
        &self.row
    }

    /// Get the mission progress
    pub fn progress(&self) -> &MissionProgress {
        &self.progress
    }

    /// Borrow the board
    pub fn hardware(&self) -> &H {
        &self.hw
    }

    /// Mutably borrow the board
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    /// Give the board and delay back (e.g. to sound the alarm)
    pub fn into_parts(self) -> (H, D) {
        (self.hw, self.delay)
    }

    /// Read the battery monitor channel (raw 0-255)
    pub fn battery_level(&mut self) -> u8 {
        self.hw.analog_read(self.channels.battery)
    }

    /// Run one control cycle
    pub async fn run_cycle(&mut self) -> Result<CycleReport, MissionError> {
        if self.state.is_terminal() {
            return Err(MissionError::AlreadyTerminated(self.state));
        }

        let reading = SensorReading::sample(&mut self.hw, &self.channels);
        let steering = self.follower.compute_velocity(reading);

        match steering {
            Steering::Drive(rule) => self.hw.forward(rule.speeds()),
            Steering::Hold => {}
            Steering::Lost => {
                self.hw.halt();
                self.state = self.state.transition(Event::LineLost);
                return Ok(self.report(reading, steering, false, SprayAction::Continue));
            }
        }

        let update = self.odometry.update_shared(self.counters, self.row);
        self.row = update.row;

        let decision = self.sprayer.tick(self.row, self.progress);
        self.row = decision.row;
        self.progress = decision.progress;

        if let SprayAction::Spray(stop) = &decision.action {
            self.execute_stop(stop).await;
        }

        let battery = if self.screen.shows_telemetry() {
            self.battery_level()
        } else {
            0
        };
        self.screen
            .render(&mut self.hw, &self.progress, &reading, battery);

        let event = if self.sprayer.is_complete(&self.progress) {
            self.hw.stop();
            Event::TargetReached
        } else {
            Event::CycleCompleted
        };
        self.state = self.state.transition(event);

        Ok(self.report(reading, steering, update.turn_detected, decision.action))
    }

    /// Run cycles until the mission ends, returning the terminal state
    pub async fn run(&mut self) -> State {
        loop {
            match self.run_cycle().await {
                Ok(report) if report.state.is_terminal() => return report.state,
                Ok(_) => {}
                Err(MissionError::AlreadyTerminated(state)) => return state,
            }
        }
    }

    async fn execute_stop(&mut self, stop: &SprayStop) {
        for step in stop.steps() {
            match step {
                SprayStep::Halt => self.hw.halt(),
                SprayStep::SprayerOn => self.hw.sprayer_on(),
                SprayStep::SprayerOff => self.hw.sprayer_off(),
                SprayStep::Advance(speeds) => self.hw.forward(speeds),
                SprayStep::Wait(ms) => self.delay.delay_ms(ms).await,
            }
        }
    }

    fn report(
        &self,
        reading: SensorReading,
        steering: Steering,
        turn_detected: bool,
        action: SprayAction,
    ) -> CycleReport {
        CycleReport {
            reading,
            steering,
            turn_detected,
            action,
            row: self.row,
            progress: self.progress,
            state: self.state,
        }
    }
}
