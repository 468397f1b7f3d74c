//! State management module
//!
//! This module contains the timer's settings, countdown and phase state, the
//! snapshots published to observers, and the controller that ties them together.

pub mod settings;
pub mod timer_state;
pub mod snapshot;
pub mod controller;

// Re-export main types
pub use settings::{Delta, LengthKind, Settings};
pub use timer_state::{TickOutcome, TimerState};
pub use snapshot::{TimerEvent, TimerSnapshot};
pub use controller::{Controller, TICK_PERIOD};
