//! Countdown ticker background task

use std::sync::Weak;
use tokio::time::Interval;
use tracing::debug;

use crate::state::Controller;

/// Tick the controller on every `ticker` period until the task is cancelled,
/// superseded by a newer generation, or the controller is dropped
pub async fn countdown_task(controller: Weak<Controller>, generation: u64, mut ticker: Interval) {
    debug!("Starting countdown task {}", generation);

    loop {
        ticker.tick().await;

        let Some(controller) = controller.upgrade() else {
            debug!("Controller dropped, ending countdown task {}", generation);
            break;
        };

        if !controller.tick(generation) {
            break;
        }
    }

    debug!("Countdown task {} finished", generation);
}
