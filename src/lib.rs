//! Pomodoro Clock - a session/break countdown timer
//!
//! This library provides the timer controller (settings, countdown, phase
//! tracking and alerting), display helpers, and an HTTP surface through
//! which a presentation layer drives and observes the timer.

pub mod config;
pub mod display;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{Controller, TimerSnapshot};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
