//! Pomodoro Clock - a session/break countdown timer
//!
//! This is the main entry point for the pomodoro-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use pomodoro_clock::{
    api::create_router,
    config::Config,
    services::{check_alert_resource, Alert, CommandAlert, SilentAlert},
    state::Controller,
    tasks::event_log_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-clock v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, player={}",
          config.host, config.port, config.player);

    // A missing sound file only costs us the alert, not the timer
    let alert: Arc<dyn Alert> = match &config.sound {
        Some(sound) => {
            if let Err(e) = check_alert_resource(sound).await {
                warn!("{}", e);
            }
            Arc::new(CommandAlert::new(config.player.clone(), sound.clone()))
        }
        None => {
            info!("No alert sound configured, interval changes will be silent");
            Arc::new(SilentAlert)
        }
    };

    let controller = Controller::create(alert);

    let log_controller = Arc::clone(&controller);
    tokio::spawn(async move {
        event_log_task(log_controller).await;
    });

    let app = create_router(Arc::clone(&controller));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start                      - Start or pause the countdown");
    info!("  POST /reset                      - Stop and restore defaults");
    info!("  POST /{{break,session}}/increment - Lengthen an interval by a minute");
    info!("  POST /{{break,session}}/decrement - Shorten an interval by a minute");
    info!("  POST /theme                      - Toggle dark mode");
    info!("  GET  /status                     - Current timer view");
    info!("  GET  /events                     - Server-sent timer updates");
    info!("  GET  /health                     - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    controller.dispose();
    info!("Server shutdown complete");
    Ok(())
}
