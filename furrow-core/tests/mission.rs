//! Whole-mission tests against a simulated board

use embassy_futures::block_on;
use embedded_hal_async::delay::DelayNs;

use furrow_core::alarm::Alarm;
use furrow_core::config::{DisplayLayout, MissionConfig};
use furrow_core::line::{SensorReading, Steering, SteeringRule};
use furrow_core::mission::{Mission, MissionError};
use furrow_core::odometry::{EncoderCounters, TickCounts};
use furrow_core::spray::SprayAction;
use furrow_core::state::State;
use furrow_core::traits::{
    AnalogInput, Buzzer, CharDisplay, DifferentialDrive, DriveDirection, Sprayer, WheelSpeeds,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Drive(WheelSpeeds, DriveDirection),
    SprayerOn,
    SprayerOff,
    BuzzerOn,
    BuzzerOff,
    Text(u8, u8, String),
}

/// Board with fixed sensor readings that records every actuator call
struct FakeBoard {
    /// Indexed by analog channel; defaults put the line under the center sensor
    channels: [u8; 16],
    ops: Vec<Op>,
}

impl FakeBoard {
    fn new() -> Self {
        let mut board = Self {
            channels: [0; 16],
            ops: Vec::new(),
        };
        board.set_reading(SensorReading::new(20, 5, 20));
        board.channels[0] = 180;
        board
    }

    fn set_reading(&mut self, reading: SensorReading) {
        self.channels[3] = reading.left;
        self.channels[2] = reading.center;
        self.channels[1] = reading.right;
    }

    fn spray_pulses(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::SprayerOn).count()
    }

    fn last_drive(&self) -> Option<(WheelSpeeds, DriveDirection)> {
        self.ops.iter().rev().find_map(|op| match op {
            Op::Drive(speeds, dir) => Some((*speeds, *dir)),
            _ => None,
        })
    }
}

impl AnalogInput for FakeBoard {
    fn analog_read(&mut self, channel: u8) -> u8 {
        self.channels[channel as usize]
    }
}

impl DifferentialDrive for FakeBoard {
    fn set_drive(&mut self, speeds: WheelSpeeds, direction: DriveDirection) {
        self.ops.push(Op::Drive(speeds, direction));
    }
}

impl Sprayer for FakeBoard {
    fn sprayer_on(&mut self) {
        self.ops.push(Op::SprayerOn);
    }

    fn sprayer_off(&mut self) {
        self.ops.push(Op::SprayerOff);
    }
}

impl Buzzer for FakeBoard {
    fn buzzer_on(&mut self) {
        self.ops.push(Op::BuzzerOn);
    }

    fn buzzer_off(&mut self) {
        self.ops.push(Op::BuzzerOff);
    }
}

impl CharDisplay for FakeBoard {
    fn write_text(&mut self, row: u8, col: u8, text: &str) {
        self.ops.push(Op::Text(row, col, text.into()));
    }
}

/// Delay that returns immediately and remembers what it was asked for
#[derive(Default)]
struct FakeDelay {
    waits_ms: Vec<u32>,
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, _ns: u32) {}

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

type TestMission<'a> = Mission<'a, FakeBoard, FakeDelay>;

fn mission(counters: &EncoderCounters) -> TestMission<'_> {
    Mission::new(
        FakeBoard::new(),
        FakeDelay::default(),
        counters,
        MissionConfig::default(),
    )
}

/// Run `cycles` cycles, moving the wheels by `left`/`right` ticks before each
fn drive(mission: &mut TestMission<'_>, counters: &EncoderCounters, cycles: u32, left: u32, right: u32) {
    for _ in 0..cycles {
        counters.add(left, right);
        block_on(mission.run_cycle()).unwrap();
    }
}

/// Drive a row to distance 90, pivot, cross `side` units, and pivot back
fn drive_row_and_cross(mission: &mut TestMission<'_>, counters: &EncoderCounters, side: u32) {
    drive(mission, counters, 90, 1, 1);
    drive(mission, counters, 1, 40, 0);
    drive(mission, counters, side, 1, 1);
    drive(mission, counters, 1, 0, 40);
}

#[test]
fn test_straight_line_first_cycle() {
    let counters = EncoderCounters::new();
    let mut mission = mission(&counters);

    let report = block_on(mission.run_cycle()).unwrap();

    assert_eq!(report.steering, Steering::Drive(SteeringRule::Straight));
    assert_eq!(report.state, State::Running);
    assert_eq!(report.action, SprayAction::Continue);
    assert_eq!(
        mission.hardware().ops,
        vec![
            Op::Drive(WheelSpeeds::new(120, 120), DriveDirection::Forward),
            Op::Text(1, 1, "0000".into()),
        ]
    );
}

#[test]
fn test_spray_stop_sequence() {
    let counters = EncoderCounters::new();
    let mut mission = mission(&counters);

    drive(&mut mission, &counters, 19, 1, 1);
    assert_eq!(mission.hardware().spray_pulses(), 0);

    counters.add(1, 1);
    let report = block_on(mission.run_cycle()).unwrap();
    assert!(matches!(report.action, SprayAction::Spray(stop) if stop.distance == 20));
    assert_eq!(report.progress.plants_sprayed, 2);
    assert_eq!(report.row.stops_in_row, 1);

    let ops = &mission.hardware().ops;
    let tail = &ops[ops.len() - 6..];
    assert_eq!(
        tail,
        &[
            Op::Drive(WheelSpeeds::new(120, 120), DriveDirection::Forward),
            Op::Drive(WheelSpeeds::ZERO, DriveDirection::Forward),
            Op::SprayerOn,
            Op::SprayerOff,
            Op::Drive(WheelSpeeds::new(100, 100), DriveDirection::Forward),
            Op::Text(1, 1, "0002".into()),
        ]
    );

    // Sitting on the same distance does not spray again
    let report = block_on(mission.run_cycle()).unwrap();
    assert_eq!(report.action, SprayAction::Continue);
    assert_eq!(mission.hardware().spray_pulses(), 1);

    let (_, delay) = mission.into_parts();
    assert_eq!(delay.waits_ms, vec![3000, 500]);
}

#[test]
fn test_full_mission_reaches_target() {
    let counters = EncoderCounters::new();
    let mut mission = mission(&counters);

    // First row: four stops, two plants each
    drive_row_and_cross(&mut mission, &counters, 15);
    assert_eq!(mission.progress().plants_sprayed, 8);
    assert_eq!(mission.row().turns_taken, 2);
    assert_eq!(mission.row().previous_side_distance, 15);

    // Second row: four more plants
    drive_row_and_cross(&mut mission, &counters, 15);
    assert_eq!(mission.progress().plants_sprayed, 12);
    assert_eq!(mission.row().turns_taken, 4);
    assert_eq!(mission.row().previous_side_distance, 30);

    // Third row finishes the job at the fourth stop
    drive(&mut mission, &counters, 79, 1, 1);
    assert_eq!(mission.state(), State::Running);
    assert_eq!(mission.progress().plants_sprayed, 15);

    counters.add(1, 1);
    let report = block_on(mission.run_cycle()).unwrap();
    assert_eq!(report.state, State::Done);
    assert_eq!(report.progress.plants_sprayed, 16);
    assert_eq!(
        mission.hardware().last_drive(),
        Some((WheelSpeeds::ZERO, DriveDirection::Stop))
    );
    assert_eq!(mission.hardware().spray_pulses(), 12);

    // Nothing happens after completion
    counters.add(20, 20);
    assert_eq!(
        block_on(mission.run_cycle()),
        Err(MissionError::AlreadyTerminated(State::Done))
    );
    assert_eq!(mission.hardware().spray_pulses(), 12);
}

#[test]
fn test_turn_clears_counters_and_row_stops() {
    let counters = EncoderCounters::new();
    let mut mission = mission(&counters);

    drive(&mut mission, &counters, 45, 1, 1);
    assert_eq!(mission.row().stops_in_row, 2);

    counters.add(100, 60);
    let report = block_on(mission.run_cycle()).unwrap();
    assert!(report.turn_detected);
    assert_eq!(report.row.turns_taken, 1);
    assert_eq!(report.row.stops_in_row, 0);
    assert_eq!(report.row.sprayed_distance, 0);
    assert_eq!(report.row.distance_in_row, 45);
    assert_eq!(counters.snapshot(), TickCounts::ZERO);
}

#[test]
fn test_line_lost_is_fail_stop() {
    let counters = EncoderCounters::new();
    let mut mission = mission(&counters);

    drive(&mut mission, &counters, 5, 1, 1);
    mission
        .hardware_mut()
        .set_reading(SensorReading::new(200, 200, 200));

    counters.add(1, 1);
    let report = block_on(mission.run_cycle()).unwrap();
    assert_eq!(report.steering, Steering::Lost);
    assert_eq!(report.state, State::Lost);
    assert_eq!(
        mission.hardware().last_drive(),
        Some((WheelSpeeds::ZERO, DriveDirection::Forward))
    );
    // Odometry was not advanced on the lost cycle
    assert_eq!(mission.row().distance_in_row, 5);

    // The line coming back does not revive the mission
    mission
        .hardware_mut()
        .set_reading(SensorReading::new(20, 5, 20));
    assert_eq!(
        block_on(mission.run_cycle()),
        Err(MissionError::AlreadyTerminated(State::Lost))
    );
    assert_eq!(block_on(mission.run()), State::Lost);

    let (mut board, mut delay) = mission.into_parts();
    block_on(Alarm::default().beep(&mut board, &mut delay));
    assert_eq!(&board.ops[board.ops.len() - 2..], &[Op::BuzzerOn, Op::BuzzerOff]);
    assert_eq!(delay.waits_ms, vec![250, 250]);
}

#[test]
fn test_hold_keeps_previous_command() {
    let counters = EncoderCounters::new();
    let mut mission = mission(&counters);

    block_on(mission.run_cycle()).unwrap();
    mission
        .hardware_mut()
        .set_reading(SensorReading::new(10, 10, 10));

    let before = mission.hardware().ops.len();
    let report = block_on(mission.run_cycle()).unwrap();
    assert_eq!(report.steering, Steering::Hold);

    // Only the status line was written
    let new_ops = &mission.hardware().ops[before..];
    assert_eq!(new_ops, &[Op::Text(1, 1, "0000".into())]);
}

#[test]
fn test_telemetry_layout_shows_sensors_and_battery() {
    let counters = EncoderCounters::new();
    let mut mission = mission(&counters).with_layout(DisplayLayout::with_telemetry());

    block_on(mission.run_cycle()).unwrap();

    let texts: Vec<_> = mission
        .hardware()
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Text(r, c, t) => Some((*r, *c, t.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(
        texts,
        vec![
            (1, 1, "0000"),
            (2, 1, "020"),
            (2, 5, "005"),
            (2, 9, "020"),
            (2, 13, "180"),
        ]
    );
}

#[test]
fn test_run_until_done_with_simulated_motion() {
    // A board whose wheels move one tick per side every cycle and that pivots
    // at the end of each row
    let counters = EncoderCounters::new();
    let config = MissionConfig {
        plant_target: 4,
        ..Default::default()
    };
    let mut mission = Mission::new(FakeBoard::new(), FakeDelay::default(), &counters, config);

    let mut cycles = 0;
    while mission.state() == State::Running {
        counters.add(1, 1);
        block_on(mission.run_cycle()).unwrap();
        cycles += 1;
        assert!(cycles < 1000, "mission did not finish");
    }

    // Two first-row stops at 20 and 40 reach the target of four
    assert_eq!(mission.state(), State::Done);
    assert_eq!(cycles, 40);
    assert_eq!(mission.progress().plants_sprayed, 4);
}
