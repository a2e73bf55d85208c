//! Mission task
//!
//! Runs the control cycle until the mission ends. The cycle only awaits
//! during a spray stop, so the task yields after every cycle to let the
//! encoder tasks run.
//!
//! Reaching the plant target parks the rover. Losing the line is a
//! fail-stop: the buzzer sounds until the board is power-cycled.

use defmt::*;
use embassy_futures::yield_now;
use embassy_time::Delay;

use furrow_core::alarm::Alarm;
use furrow_core::config::MissionConfig;
use furrow_core::mission::{CycleReport, Mission, MissionError};
use furrow_core::spray::SprayAction;
use furrow_core::state::State;

use crate::board::Board;
use crate::channels::ENCODERS;

/// Run the mission on the board
#[embassy_executor::task]
pub async fn mission_task(board: Board, config: MissionConfig) {
    info!(
        "Mission task started: target {} plants, stop every {} units",
        config.plant_target, config.spray_interval
    );

    let mut mission = Mission::new(board, Delay, &ENCODERS, config);

    let state = loop {
        match mission.run_cycle().await {
            Ok(report) => {
                log_cycle(&report);
                if report.state.is_terminal() {
                    break report.state;
                }
            }
            Err(MissionError::AlreadyTerminated(state)) => break state,
        }
        yield_now().await;
    };

    match state {
        State::Done => {
            info!(
                "Mission complete: {} plants sprayed",
                mission.progress().plants_sprayed
            );
        }
        State::Lost => {
            error!(
                "Line lost at row distance {}, turns {}; stopping",
                mission.row().distance_in_row,
                mission.row().turns_taken
            );
            let (mut board, mut delay) = mission.into_parts();
            Alarm::default().sound_forever(&mut board, &mut delay).await;
        }
        State::Running => unreachable!(),
    }
}

fn log_cycle(report: &CycleReport) {
    trace!("Cycle: {}", report.reading);

    if report.turn_detected {
        info!(
            "Turn {} detected (sidewise {})",
            report.row.turns_taken, report.row.sidewise_distance
        );
    }

    if let SprayAction::Spray(stop) = report.action {
        info!(
            "Sprayed at distance {} (stop {}, +{} plants, total {})",
            stop.distance, report.row.stops_in_row, stop.plants, report.progress.plants_sprayed
        );
    }

    if report.state.is_error() {
        warn!("Line lost: {}", report.reading);
    }
}
