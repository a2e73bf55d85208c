//! Wheel encoder tasks
//!
//! One task per wheel waits for falling edges on the encoder input and
//! bumps the matching shared counter. The mission task reads and clears
//! the counters under the same critical section, so a tick landing in the
//! middle of a cycle is either seen this cycle or the next.

use defmt::*;
use embassy_rp::gpio::Input;

use crate::channels::ENCODERS;

/// Which wheel an encoder is mounted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Wheel {
    Left,
    Right,
}

/// Count falling edges on one encoder input
#[embassy_executor::task(pool_size = 2)]
pub async fn encoder_task(mut pin: Input<'static>, wheel: Wheel) {
    info!("{} encoder task started", wheel);

    loop {
        pin.wait_for_falling_edge().await;
        match wheel {
            Wheel::Left => ENCODERS.record_left(),
            Wheel::Right => ENCODERS.record_right(),
        }
    }
}
