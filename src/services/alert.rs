//! Audio alert played at interval boundaries

use std::{
    fmt,
    path::{Path, PathBuf},
    process::Stdio,
    sync::Mutex,
};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// A playable alert sound.
///
/// Both calls are fire-and-forget: they never block on playback and never
/// report failure to the caller.
pub trait Alert: Send + Sync + fmt::Debug {
    /// Rewind to the beginning and start playing, restarting any playback
    /// already in progress
    fn play_from_start(&self);

    /// Stop playback and rewind to the beginning
    fn stop_and_rewind(&self);
}

/// Alert used when no sound file is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAlert;

impl Alert for SilentAlert {
    fn play_from_start(&self) {
        debug!("Alert fired (silent)");
    }

    fn stop_and_rewind(&self) {}
}

/// Alert that plays a sound file through an external player command
pub struct CommandAlert {
    player: String,
    sound: PathBuf,
    /// Player process of the playback in progress, if any
    current: Mutex<Option<Child>>,
}

impl CommandAlert {
    /// Create an alert that runs `player <sound>` on every rollover
    pub fn new(player: impl Into<String>, sound: impl Into<PathBuf>) -> Self {
        Self {
            player: player.into(),
            sound: sound.into(),
            current: Mutex::new(None),
        }
    }

    /// Whether a player process was started and has not been stopped since
    pub fn is_playing(&self) -> bool {
        self.current
            .lock()
            .map(|current| current.is_some())
            .unwrap_or(false)
    }

    fn spawn_player(&self) -> Result<Child, String> {
        Command::new(&self.player)
            .arg(&self.sound)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("Failed to execute {}: {}", self.player, e))
    }

    fn kill(child: &mut Child) {
        // an already finished player is fine, there is nothing left to rewind
        if let Err(e) = child.start_kill() {
            debug!("Alert player already exited: {}", e);
        }
    }
}

impl Alert for CommandAlert {
    fn play_from_start(&self) {
        let mut current = match self.current.lock() {
            Ok(current) => current,
            Err(e) => {
                warn!("Failed to lock alert player: {}", e);
                return;
            }
        };

        if let Some(mut previous) = current.take() {
            Self::kill(&mut previous);
        }

        match self.spawn_player() {
            Ok(child) => {
                debug!("Playing alert {} with {}", self.sound.display(), self.player);
                *current = Some(child);
            }
            Err(e) => warn!("Alert playback failed: {}", e),
        }
    }

    fn stop_and_rewind(&self) {
        match self.current.lock() {
            Ok(mut current) => {
                if let Some(mut child) = current.take() {
                    debug!("Stopping alert playback");
                    Self::kill(&mut child);
                }
            }
            Err(e) => warn!("Failed to lock alert player: {}", e),
        }
    }
}

impl fmt::Debug for CommandAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandAlert")
            .field("player", &self.player)
            .field("sound", &self.sound)
            .field("playing", &self.is_playing())
            .finish()
    }
}

/// Check that the alert sound file exists and is a regular file
pub async fn check_alert_resource(path: &Path) -> Result<(), String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| format!("Alert sound {} is not readable: {}", path.display(), e))?;

    if !metadata.is_file() {
        return Err(format!("Alert sound {} is not a file", path.display()));
    }

    info!("Alert sound found at {}", path.display());
    Ok(())
}
