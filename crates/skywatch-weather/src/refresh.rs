//! Self-rescheduling refresh loop with exponential backoff.
//!
//! The loop runs one tick at a time: a successful tick re-arms the
//! timer at the base interval, a failed tick doubles the delay up to a
//! cap. The handle exposes pause/resume so a host can wire them to
//! whatever "is anyone looking" signal it has; a resume schedules a
//! near-immediate tick regardless of backoff state.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub const DEFAULT_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 300_000;
pub const RESUME_DELAY_MS: u64 = 1_000;

#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Base delay between successful refreshes.
    pub interval: Duration,
    /// Ceiling for the failure backoff.
    pub max_backoff: Duration,
    /// Delay before the first tick after a resume.
    pub resume_delay: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS, DEFAULT_MAX_BACKOFF_MS)
    }
}

impl RefreshConfig {
    pub fn new(interval_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            max_backoff: Duration::from_millis(max_backoff_ms),
            resume_delay: Duration::from_millis(RESUME_DELAY_MS),
        }
    }

    /// Delay before the next tick, given the delay that preceded the
    /// tick that just finished and whether it succeeded.
    pub fn next_delay(&self, current: Duration, succeeded: bool) -> Duration {
        if succeeded {
            self.interval
        } else {
            current.saturating_mul(2).min(self.max_backoff)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshState {
    Idle,
    Scheduled,
    Running,
}

#[derive(Debug)]
enum Command {
    Pause,
    Resume,
    Shutdown,
}

/// Controls a refresh loop spawned with [`spawn`]. Dropping the handle
/// does not stop the loop; call [`RefreshHandle::shutdown`].
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl RefreshHandle {
    /// Cancel the pending timer. No ticks run until [`resume`].
    ///
    /// [`resume`]: RefreshHandle::resume
    pub fn pause(&self) {
        let _ = self.tx.send(Command::Pause);
    }

    /// Schedule a near-immediate tick, clearing any backoff delay.
    pub fn resume(&self) {
        let _ = self.tx.send(Command::Resume);
    }

    /// Permanently stop the loop.
    pub fn shutdown(&self) {
        let _ = self.tx.send(Command::Shutdown);
    }
}

/// Spawn the refresh loop. `tick` runs once per scheduled refresh and
/// reports success (`true`) or a soft failure (`false`). The first
/// tick fires after the base interval.
pub fn spawn<F, Fut>(config: RefreshConfig, mut tick: F) -> RefreshHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = bool> + Send,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = RefreshHandle { tx };

    tokio::spawn(async move {
        let mut state = RefreshState::Scheduled;
        let mut delay = config.interval;

        loop {
            match state {
                RefreshState::Idle => match rx.recv().await {
                    Some(Command::Resume) => {
                        debug!("refresh resumed");
                        delay = config.resume_delay;
                        state = RefreshState::Scheduled;
                    }
                    Some(Command::Pause) => {}
                    Some(Command::Shutdown) | None => break,
                },
                RefreshState::Scheduled => {
                    tokio::select! {
                        command = rx.recv() => match command {
                            Some(Command::Pause) => {
                                debug!("refresh paused");
                                state = RefreshState::Idle;
                            }
                            Some(Command::Resume) => {}
                            Some(Command::Shutdown) | None => break,
                        },
                        _ = tokio::time::sleep(delay) => {
                            state = RefreshState::Running;
                        }
                    }
                }
                RefreshState::Running => {
                    let succeeded = tick().await;
                    delay = config.next_delay(delay, succeeded);
                    if !succeeded {
                        warn!(next_delay_ms = delay.as_millis() as u64, "refresh tick failed, backing off");
                    }
                    state = RefreshState::Scheduled;
                }
            }
        }

        info!("refresh loop stopped");
    });

    handle
}
