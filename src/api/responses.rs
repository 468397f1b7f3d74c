//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerSnapshot;

/// Display-ready view of the timer returned by every control endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    /// Remaining time as `MM:SS`
    pub time: String,
    pub phase: String,
    pub near_end: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub state: TimerSnapshot,
}

impl TimerView {
    pub fn new(state: TimerSnapshot) -> Self {
        Self {
            time: state.clock(),
            phase: state.phase_label().to_string(),
            near_end: state.near_end(),
            timestamp: Utc::now(),
            state,
        }
    }
}

/// Status response with controller metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_view_serialization() {
        let view = TimerView::new(TimerSnapshot::default());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["time"], "25:00");
        assert_eq!(json["phase"], "Session");
        assert_eq!(json["near_end"], false);
        // snapshot fields sit next to the derived ones
        assert_eq!(json["remaining_seconds"], 1500);
        assert_eq!(json["break_minutes"], 5);
        assert_eq!(json["running"], false);
    }
}
