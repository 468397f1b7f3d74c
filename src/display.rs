//! Formatting helpers for rendering the countdown

/// Seconds left below which the display is flagged as nearly finished
pub const NEAR_END_SECONDS: u32 = 60;

/// Format a number of seconds as `MM:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Whether the countdown should be rendered in its "almost done" style
pub fn is_near_end(seconds: u32) -> bool {
    seconds < NEAR_END_SECONDS
}

pub fn phase_label(on_break: bool) -> &'static str {
    if on_break { "Break" } else { "Session" }
}
