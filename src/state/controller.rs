//! Timer controller: owns settings, countdown and phase, and drives the tick task

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
    time::{interval_at, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use super::{Delta, LengthKind, Settings, TickOutcome, TimerEvent, TimerSnapshot, TimerState};
use crate::{
    display::{format_clock, phase_label},
    services::Alert,
    tasks::countdown_task,
};

/// Cadence of the countdown while running
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// State guarded by the controller lock
#[derive(Debug)]
struct Inner {
    settings: Settings,
    timer: TimerState,
    dark_mode: bool,
    /// Identity of the tick task allowed to mutate the countdown
    generation: u64,
    tick_task: Option<JoinHandle<()>>,
    last_action: Option<String>,
    last_action_time: Option<DateTime<Utc>>,
}

impl Inner {
    fn new() -> Self {
        let settings = Settings::new();
        Self {
            timer: TimerState::new(&settings),
            settings,
            dark_mode: false,
            generation: 0,
            tick_task: None,
            last_action: None,
            last_action_time: None,
        }
    }

    fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::new(&self.settings, &self.timer, self.dark_mode)
    }

    /// Invalidate the current tick task and abort it
    fn cancel_ticks(&mut self) {
        self.generation += 1;
        self.timer.running = false;
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
    }
}

/// Pomodoro timer controller.
///
/// All user actions and ticks run under one lock, so each one is applied
/// completely before the next begins. Observers follow changes through
/// [`subscribe`](Self::subscribe) (latest snapshot) and
/// [`events`](Self::events) (discrete transitions).
#[derive(Debug)]
pub struct Controller {
    inner: Mutex<Inner>,
    alert: Arc<dyn Alert>,
    start_time: Instant,
    /// Channel carrying the latest snapshot to renderers
    snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
    /// Channel for discrete timer events
    event_tx: broadcast::Sender<TimerEvent>,
}

impl Controller {
    /// Create a stopped controller with default settings
    pub fn create(alert: Arc<dyn Alert>) -> Arc<Self> {
        let inner = Inner::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(inner.snapshot());
        let (event_tx, _) = broadcast::channel(100);

        Arc::new(Self {
            inner: Mutex::new(inner),
            alert,
            start_time: Instant::now(),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            event_tx,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, String> {
        self.inner
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Push the new state to observers. Called with the lock held so
    /// snapshots are delivered in the order they were produced.
    fn publish(&self, inner: &mut Inner, event: Option<TimerEvent>) -> TimerSnapshot {
        let snapshot = inner.snapshot();

        if let Some(event) = event {
            inner.last_action = Some(event.action().to_string());
            inner.last_action_time = Some(Utc::now());

            // no subscribers is normal
            if self.event_tx.send(event).is_err() {
                debug!("No listeners for timer event {:?}", event);
            }
        }

        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to send timer snapshot: {}", e);
        }

        snapshot
    }

    /// Start/pause toggle.
    ///
    /// Starting spawns a task that ticks once per [`TICK_PERIOD`]; pausing
    /// aborts it. Must be called from within a Tokio runtime.
    pub fn start(self: &Arc<Self>) -> Result<TimerSnapshot, String> {
        let mut inner = self.lock()?;

        if inner.timer.running {
            inner.cancel_ticks();
            info!(
                "Timer paused at {}",
                format_clock(inner.timer.remaining_seconds)
            );
            return Ok(self.publish(&mut inner, Some(TimerEvent::Paused)));
        }

        inner.generation += 1;
        inner.timer.running = true;

        let generation = inner.generation;
        let mut ticker = interval_at(tokio::time::Instant::now() + TICK_PERIOD, TICK_PERIOD);
        // after a stall, resume one tick per period instead of catching up
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        inner.tick_task = Some(tokio::spawn(countdown_task(
            Arc::downgrade(self),
            generation,
            ticker,
        )));

        info!(
            "Timer started at {} ({})",
            format_clock(inner.timer.remaining_seconds),
            phase_label(inner.timer.on_break)
        );
        Ok(self.publish(&mut inner, Some(TimerEvent::Started)))
    }

    /// Apply one tick on behalf of the task spawned for `generation`.
    ///
    /// Returns `false` when that task has been cancelled or superseded and
    /// should exit; the countdown is left untouched in that case.
    pub fn tick(&self, generation: u64) -> bool {
        let mut inner = match self.lock() {
            Ok(inner) => inner,
            Err(e) => {
                error!("{}", e);
                return false;
            }
        };

        if !inner.timer.running || inner.generation != generation {
            debug!("Discarding tick from cancelled task {}", generation);
            return false;
        }

        let settings = inner.settings;
        match inner.timer.advance(&settings) {
            TickOutcome::Counted => {
                self.publish(&mut inner, None);
            }
            TickOutcome::RolledOver { on_break } => {
                info!(
                    "{} started ({})",
                    phase_label(on_break),
                    format_clock(inner.timer.remaining_seconds)
                );
                self.alert.play_from_start();
                self.publish(&mut inner, Some(TimerEvent::Rollover { on_break }));
            }
        }
        true
    }

    /// Step the break or session length by one minute.
    ///
    /// Out-of-range requests are ignored. An accepted session change also
    /// reloads the countdown with the new session length, whatever the
    /// timer is doing; break changes only take effect at the next rollover.
    pub fn adjust(&self, kind: LengthKind, delta: Delta) -> Result<TimerSnapshot, String> {
        let mut inner = self.lock()?;

        let Some(minutes) = inner.settings.adjust(kind, delta) else {
            debug!(
                "Ignoring {} {} at {} minutes",
                kind.as_str(),
                delta.as_str(),
                inner.settings.minutes(kind)
            );
            return Ok(inner.snapshot());
        };

        if kind == LengthKind::Session {
            inner.timer.remaining_seconds = minutes * 60;
        }

        info!("{} length set to {} minutes", kind.as_str(), minutes);
        Ok(self.publish(&mut inner, Some(TimerEvent::Adjusted { kind, minutes })))
    }

    /// Stop the countdown and restore every default, silencing the alert
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        let mut inner = self.lock()?;

        inner.cancel_ticks();
        let settings = Settings::new();
        inner.timer = TimerState::new(&settings);
        inner.settings = settings;
        self.alert.stop_and_rewind();

        info!("Timer reset");
        Ok(self.publish(&mut inner, Some(TimerEvent::Reset)))
    }

    /// Flip the light/dark display flag
    pub fn toggle_dark_mode(&self) -> Result<TimerSnapshot, String> {
        let mut inner = self.lock()?;
        inner.dark_mode = !inner.dark_mode;
        let dark_mode = inner.dark_mode;
        Ok(self.publish(&mut inner, Some(TimerEvent::ThemeToggled { dark_mode })))
    }

    /// Get the current snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        self.lock().map(|inner| inner.snapshot())
    }

    /// Follow the latest snapshot
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Receive discrete timer events
    pub fn events(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Get last action information
    pub fn last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.lock() {
            Ok(inner) => (inner.last_action.clone(), inner.last_action_time),
            Err(_) => (None, None),
        }
    }

    /// Calculate controller uptime as a formatted string
    pub fn uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Stop ticking and silence the alert before the host lets go of the
    /// controller
    pub fn dispose(&self) {
        match self.lock() {
            Ok(mut inner) => {
                inner.cancel_ticks();
                self.publish(&mut inner, None);
            }
            Err(e) => error!("{}", e),
        }
        self.alert.stop_and_rewind();
        info!("Timer controller disposed");
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        if let Ok(inner) = self.inner.get_mut() {
            inner.cancel_ticks();
        }
    }
}
