//! Background tasks module
//!
//! This module contains the countdown ticker and the event logger that run
//! alongside the HTTP server.

pub mod countdown;
pub mod event_log;

// Re-export main functions
pub use countdown::countdown_task;
pub use event_log::event_log_task;
