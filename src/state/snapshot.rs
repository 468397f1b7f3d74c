//! Read-only views of the controller published to observers

use serde::{Deserialize, Serialize};

use super::{LengthKind, Settings, TimerState};
use crate::display::{format_clock, is_near_end, phase_label};

/// Everything a presentation layer needs to draw the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub break_minutes: u32,
    pub session_minutes: u32,
    pub remaining_seconds: u32,
    pub running: bool,
    pub on_break: bool,
    pub dark_mode: bool,
}

impl TimerSnapshot {
    pub fn new(settings: &Settings, timer: &TimerState, dark_mode: bool) -> Self {
        Self {
            break_minutes: settings.break_minutes,
            session_minutes: settings.session_minutes,
            remaining_seconds: timer.remaining_seconds,
            running: timer.running,
            on_break: timer.on_break,
            dark_mode,
        }
    }

    /// Remaining time as `MM:SS`
    pub fn clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    pub fn near_end(&self) -> bool {
        is_near_end(self.remaining_seconds)
    }

    /// "Session" or "Break"
    pub fn phase_label(&self) -> &'static str {
        phase_label(self.on_break)
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::new(&Settings::default(), &TimerState::default(), false)
    }
}

/// Discrete changes broadcast alongside snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    Started,
    Paused,
    Rollover { on_break: bool },
    Adjusted { kind: LengthKind, minutes: u32 },
    Reset,
    ThemeToggled { dark_mode: bool },
}

impl TimerEvent {
    /// Short name recorded as the controller's last action
    pub fn action(&self) -> &'static str {
        match self {
            TimerEvent::Started => "start",
            TimerEvent::Paused => "pause",
            TimerEvent::Rollover { .. } => "rollover",
            TimerEvent::Adjusted { .. } => "adjust",
            TimerEvent::Reset => "reset",
            TimerEvent::ThemeToggled { .. } => "theme",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_view() {
        let snapshot = TimerSnapshot::default();
        assert_eq!(snapshot.clock(), "25:00");
        assert_eq!(snapshot.phase_label(), "Session");
        assert!(!snapshot.near_end());
        assert!(!snapshot.running);
        assert!(!snapshot.dark_mode);
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_string(&TimerEvent::Adjusted {
            kind: LengthKind::Break,
            minutes: 6,
        })
        .unwrap();
        assert!(json.contains("\"event\":\"adjusted\""));
        assert!(json.contains("\"kind\":\"break\""));
        assert!(json.contains("\"minutes\":6"));
    }
}
