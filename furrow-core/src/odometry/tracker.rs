//! Row and turn tracking
//!
//! The rover drives along a row (even turn count), pivots at the row end,
//! crosses to the next row (odd turn count), and pivots again. A pivot shows
//! up as a large difference between the wheel tick counts; when one is seen
//! the counters are cleared and the turn count advances.
//!
//! Each cycle runs, in order:
//! 1. turn detection (may clear the ticks)
//! 2. row distance, on even turn counts only
//! 3. sidewise distance, accumulated on odd turn counts and latched on even

use super::counters::{EncoderCounters, TickCounts};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of the rover within the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowState {
    /// Turns detected since mission start
    pub turns_taken: u32,
    /// Distance along the current row (held while crossing)
    pub distance_in_row: u32,
    /// Total distance travelled between rows
    pub sidewise_distance: u32,
    /// Sidewise distance at the start of the current crossing
    pub previous_side_distance: u32,
    /// Spray stops made in the current row
    pub stops_in_row: u8,
    /// Row distance of the last spray stop
    pub sprayed_distance: u32,
}

impl RowState {
    /// Check if the rover is travelling along a row
    pub fn on_row(&self) -> bool {
        self.turns_taken % 2 == 0
    }

    /// Check if the rover is still in the first row
    pub fn in_first_row(&self) -> bool {
        self.turns_taken == 0
    }
}

/// Result of one odometry step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OdometryUpdate {
    /// Row state after the step
    pub row: RowState,
    /// Tick counts as read at the start of the step
    pub ticks: TickCounts,
    /// A turn was detected and the counters cleared
    pub turn_detected: bool,
}

/// Turn detection and distance bookkeeping
#[derive(Debug, Clone, Copy)]
pub struct Odometry {
    turn_threshold: u32,
}

impl Odometry {
    /// Create odometry with the given turn threshold
    ///
    /// A turn is detected when the tick difference is strictly greater.
    pub fn new(turn_threshold: u32) -> Self {
        Self { turn_threshold }
    }

    /// Check if a tick pair indicates a turn
    pub fn is_turn(&self, ticks: TickCounts) -> bool {
        ticks.difference() > self.turn_threshold
    }

    /// Advance the row state from a tick pair
    ///
    /// Pure version of the step; the caller is responsible for clearing its
    /// counters when `turn_detected` is set. See [`Odometry::update_shared`].
    pub fn update(&self, ticks: TickCounts, row: RowState) -> OdometryUpdate {
        let mut next = row;
        let turn_detected = self.is_turn(ticks);

        // Counts seen by the distance steps after the counters were cleared
        let effective = if turn_detected {
            next.turns_taken = next.turns_taken.saturating_add(1);
            next.stops_in_row = 0;
            next.sprayed_distance = 0;
            TickCounts::ZERO
        } else {
            ticks
        };

        let travelled = effective.average();
        if next.on_row() {
            next.distance_in_row = travelled;
            next.previous_side_distance = next.sidewise_distance;
        } else {
            next.sidewise_distance = next.previous_side_distance.saturating_add(travelled);
        }

        OdometryUpdate {
            row: next,
            ticks,
            turn_detected,
        }
    }

    /// Advance the row state from the shared counters
    ///
    /// Reads the counters and clears them on a turn inside one critical
    /// section, so no tick is lost between the two.
    pub fn update_shared(&self, counters: &EncoderCounters, row: RowState) -> OdometryUpdate {
        let (ticks, _) = counters.take_if(|ticks| self.is_turn(ticks));
        self.update(ticks, row)
    }
}
