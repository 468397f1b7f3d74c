//! Countdown and phase state

use serde::{Deserialize, Serialize};

use super::Settings;

/// What a single tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second was taken off the remaining time
    Counted,
    /// Zero had been showing for a full tick; the phase flipped and the
    /// countdown was reloaded from the settings
    RolledOver { on_break: bool },
}

/// Remaining time, running flag and current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub running: bool,
    pub on_break: bool,
}

impl TimerState {
    /// Create a stopped timer at the start of a session of the given settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            remaining_seconds: settings.phase_seconds(false),
            running: false,
            on_break: false,
        }
    }

    /// Advance the countdown by one tick.
    ///
    /// Zero is checked before decrementing, so a countdown that just reached
    /// zero stays at zero for one more tick before rolling over. The length
    /// of the next phase is read from `settings` at rollover time.
    pub fn advance(&mut self, settings: &Settings) -> TickOutcome {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            return TickOutcome::Counted;
        }

        self.on_break = !self.on_break;
        self.remaining_seconds = settings.phase_seconds(self.on_break);
        TickOutcome::RolledOver {
            on_break: self.on_break,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
