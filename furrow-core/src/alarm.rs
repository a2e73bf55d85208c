//! Line-lost alarm
//!
//! After the line is lost the rover stays put and beeps until someone resets
//! it. The beep pattern lives here; the board decides how long to repeat it.

use embedded_hal_async::delay::DelayNs;

use crate::traits::Buzzer;

/// Buzzer on time per beep
pub const ALARM_ON_MS: u32 = 250;

/// Silence between beeps
pub const ALARM_OFF_MS: u32 = 250;

/// Periodic beep pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alarm {
    pub on_ms: u32,
    pub off_ms: u32,
}

impl Default for Alarm {
    fn default() -> Self {
        Self {
            on_ms: ALARM_ON_MS,
            off_ms: ALARM_OFF_MS,
        }
    }
}

impl Alarm {
    /// Sound one beep followed by its silence
    pub async fn beep<B, D>(&self, buzzer: &mut B, delay: &mut D)
    where
        B: Buzzer + ?Sized,
        D: DelayNs,
    {
        buzzer.buzzer_on();
        delay.delay_ms(self.on_ms).await;
        buzzer.buzzer_off();
        delay.delay_ms(self.off_ms).await;
    }

    /// Beep until the board is reset
    pub async fn sound_forever<B, D>(&self, buzzer: &mut B, delay: &mut D) -> !
    where
        B: Buzzer + ?Sized,
        D: DelayNs,
    {
        loop {
            self.beep(buzzer, delay).await;
        }
    }
}
