//! Shared encoder tick counters
//!
//! The tick source (edge interrupt or encoder task) only ever increments.
//! The control cycle reads both counts and, when it detects a turn, clears
//! them. Both happen under one critical section so a tick can never land
//! between the read and the clear.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A consistent pair of left/right tick counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickCounts {
    pub left: u32,
    pub right: u32,
}

impl TickCounts {
    /// No ticks on either wheel
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a tick pair
    pub const fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    /// Absolute difference between the wheels
    pub fn difference(&self) -> u32 {
        self.left.abs_diff(self.right)
    }

    /// Mean travel of both wheels, rounded down
    pub fn average(&self) -> u32 {
        ((u64::from(self.left) + u64::from(self.right)) / 2) as u32
    }
}

/// Encoder counters shared between the tick source and the control cycle
pub struct EncoderCounters {
    ticks: Mutex<CriticalSectionRawMutex, Cell<TickCounts>>,
}

impl Default for EncoderCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderCounters {
    /// Create zeroed counters (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(TickCounts::ZERO)),
        }
    }

    /// Count one left encoder pulse
    pub fn record_left(&self) {
        self.add(1, 0);
    }

    /// Count one right encoder pulse
    pub fn record_right(&self) {
        self.add(0, 1);
    }

    /// Count several pulses at once
    pub fn add(&self, left: u32, right: u32) {
        self.ticks.lock(|cell| {
            let ticks = cell.get();
            cell.set(TickCounts::new(
                ticks.left.saturating_add(left),
                ticks.right.saturating_add(right),
            ));
        });
    }

    /// Read both counts without clearing
    pub fn snapshot(&self) -> TickCounts {
        self.ticks.lock(|cell| cell.get())
    }

    /// Read both counts and clear them if `should_clear` says so
    ///
    /// Returns the counts as read and whether they were cleared. The decision
    /// and the clear happen in the same critical section.
    pub fn take_if<F>(&self, should_clear: F) -> (TickCounts, bool)
    where
        F: FnOnce(TickCounts) -> bool,
    {
        self.ticks.lock(|cell| {
            let ticks = cell.get();
            let clear = should_clear(ticks);
            if clear {
                cell.set(TickCounts::ZERO);
            }
            (ticks, clear)
        })
    }

    /// Read both counts and clear them
    pub fn take(&self) -> TickCounts {
        self.take_if(|_| true).0
    }
}
