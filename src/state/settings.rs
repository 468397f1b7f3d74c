//! Interval length settings (the two user-adjustable minute fields)

use serde::{Deserialize, Serialize};

/// Default break length in minutes
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
/// Default session length in minutes
pub const DEFAULT_SESSION_MINUTES: u32 = 25;
/// Lowest value the adjustment guard accepts to move away from
pub const MIN_MINUTES: u32 = 1;
/// Highest value the adjustment guard accepts to move away from
pub const MAX_MINUTES: u32 = 60;

/// Which of the two interval lengths an adjustment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthKind {
    Break,
    Session,
}

impl LengthKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthKind::Break => "break",
            LengthKind::Session => "session",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "break" => Some(LengthKind::Break),
            "session" => Some(LengthKind::Session),
            _ => None,
        }
    }
}

/// One-minute step applied by an adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delta {
    Increment,
    Decrement,
}

impl Delta {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delta::Increment => "increment",
            Delta::Decrement => "decrement",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "increment" => Some(Delta::Increment),
            "decrement" => Some(Delta::Decrement),
            _ => None,
        }
    }
}

/// Break and session lengths in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub break_minutes: u32,
    pub session_minutes: u32,
}

impl Settings {
    /// Create settings with the default 5 minute break and 25 minute session
    pub fn new() -> Self {
        Self {
            break_minutes: DEFAULT_BREAK_MINUTES,
            session_minutes: DEFAULT_SESSION_MINUTES,
        }
    }

    /// Get the configured length of one interval in minutes
    pub fn minutes(&self, kind: LengthKind) -> u32 {
        match kind {
            LengthKind::Break => self.break_minutes,
            LengthKind::Session => self.session_minutes,
        }
    }

    /// Length in seconds of the phase selected by `on_break`
    pub fn phase_seconds(&self, on_break: bool) -> u32 {
        let minutes = if on_break {
            self.break_minutes
        } else {
            self.session_minutes
        };
        minutes * 60
    }

    /// Apply a one-minute step to an interval length.
    ///
    /// The bounds check runs on the value *before* the step: anything at or
    /// below [`MIN_MINUTES`] or at or above [`MAX_MINUTES`] is left alone,
    /// whichever direction was asked for. Returns the new value when the
    /// step was applied.
    pub fn adjust(&mut self, kind: LengthKind, delta: Delta) -> Option<u32> {
        let field = match kind {
            LengthKind::Break => &mut self.break_minutes,
            LengthKind::Session => &mut self.session_minutes,
        };

        if *field <= MIN_MINUTES || *field >= MAX_MINUTES {
            return None;
        }

        *field = match delta {
            Delta::Increment => *field + 1,
            Delta::Decrement => *field - 1,
        };
        Some(*field)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::new();
        assert_eq!(settings.break_minutes, 5);
        assert_eq!(settings.session_minutes, 25);
        assert_eq!(settings.phase_seconds(false), 1500);
        assert_eq!(settings.phase_seconds(true), 300);
    }

    #[test]
    fn test_increment_then_decrement_restores_value() {
        for kind in [LengthKind::Break, LengthKind::Session] {
            for v in 2..=58 {
                let mut settings = Settings::new();
                match kind {
                    LengthKind::Break => settings.break_minutes = v,
                    LengthKind::Session => settings.session_minutes = v,
                }
                assert_eq!(settings.adjust(kind, Delta::Increment), Some(v + 1));
                assert_eq!(settings.adjust(kind, Delta::Decrement), Some(v));
                assert_eq!(settings.minutes(kind), v);
            }
        }
    }

    #[test]
    fn test_upper_bound_is_sticky() {
        let mut settings = Settings::new();
        settings.session_minutes = 59;

        assert_eq!(settings.adjust(LengthKind::Session, Delta::Increment), Some(60));
        assert_eq!(settings.adjust(LengthKind::Session, Delta::Increment), None);
        // the guard looks at the current value, so 60 cannot step back down either
        assert_eq!(settings.adjust(LengthKind::Session, Delta::Decrement), None);
        assert_eq!(settings.session_minutes, 60);
    }

    #[test]
    fn test_lower_bound_is_sticky() {
        let mut settings = Settings::new();
        settings.break_minutes = 2;

        assert_eq!(settings.adjust(LengthKind::Break, Delta::Decrement), Some(1));
        assert_eq!(settings.adjust(LengthKind::Break, Delta::Decrement), None);
        assert_eq!(settings.adjust(LengthKind::Break, Delta::Increment), None);
        assert_eq!(settings.break_minutes, 1);
    }

    #[test]
    fn test_adjust_touches_only_target() {
        let mut settings = Settings::new();
        settings.adjust(LengthKind::Break, Delta::Increment);
        assert_eq!(settings.break_minutes, 6);
        assert_eq!(settings.session_minutes, 25);
    }

    #[test]
    fn test_kind_and_delta_parsing() {
        assert_eq!(LengthKind::from_str("Break"), Some(LengthKind::Break));
        assert_eq!(LengthKind::from_str("session"), Some(LengthKind::Session));
        assert_eq!(LengthKind::from_str("lunch"), None);
        assert_eq!(Delta::from_str("increment"), Some(Delta::Increment));
        assert_eq!(Delta::from_str("DECREMENT"), Some(Delta::Decrement));
        assert_eq!(Delta::from_str("double"), None);
    }
}
