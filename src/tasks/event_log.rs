//! Timer event logging background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{display::phase_label, state::{Controller, TimerEvent}};

/// Background task that writes every timer event to the log
pub async fn event_log_task(controller: Arc<Controller>) {
    info!("Starting timer event log task");

    let mut events = controller.events();
    // the subscription is all this task needs from the controller
    drop(controller);

    loop {
        match events.recv().await {
            Ok(event) => info!("{}", describe(&event)),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Event log fell behind, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Timer event channel closed");
                break;
            }
        }
    }
}

/// Human readable line for an event
pub fn describe(event: &TimerEvent) -> String {
    match event {
        TimerEvent::Started => "Countdown running".to_string(),
        TimerEvent::Paused => "Countdown paused".to_string(),
        TimerEvent::Rollover { on_break } => {
            format!("Time's up! {} begins", phase_label(*on_break))
        }
        TimerEvent::Adjusted { kind, minutes } => {
            format!("{} length is now {} min", kind.as_str(), minutes)
        }
        TimerEvent::Reset => "Timer back to defaults".to_string(),
        TimerEvent::ThemeToggled { dark_mode } => {
            format!("Display mode: {}", if *dark_mode { "dark" } else { "light" })
        }
    }
}
