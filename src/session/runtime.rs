use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

use super::config::SessionConfig;
use super::sink::CompletionSink;
use super::timer::{SessionState, TickOutcome, TimerSession};
use crate::pattern::BreathingPattern;

/// A server-held timer session: a `TimerSession` plus the 1 Hz ticker
/// task that drives it.
///
/// The ticker is the session's only mutator; HTTP handlers read snapshots
/// and forward commands. Stopping cancels the ticker immediately so no
/// scheduled callback outlives the session.
pub struct ManagedSession {
    config: SessionConfig,
    timer: Arc<Mutex<TimerSession>>,
    started_at: DateTime<Utc>,
    ticker_handle: Arc<Mutex<Option<JoinHandle<()>>>>,
    sink: Arc<dyn CompletionSink>,
}

impl ManagedSession {
    pub fn new(
        config: SessionConfig,
        pattern: BreathingPattern,
        sink: Arc<dyn CompletionSink>,
    ) -> Self {
        let timer = TimerSession::new(pattern, config.preparation_secs);

        Self {
            config,
            timer: Arc::new(Mutex::new(timer)),
            started_at: Utc::now(),
            ticker_handle: Arc::new(Mutex::new(None)),
            sink,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Start the session and spawn its ticker. Restarting replaces state
    /// and the previous ticker; exactly one ticker drives the timer at
    /// any time.
    pub async fn start(&self) {
        {
            let mut handle = self.ticker_handle.lock().await;
            if let Some(task) = handle.take() {
                task.abort();
            }
        }

        {
            let mut timer = self.timer.lock().await;
            timer.start();
        }

        info!("Session started: {}", self.config.session_id);

        let timer = Arc::clone(&self.timer);
        let sink = Arc::clone(&self.sink);
        let session_id = self.config.session_id.clone();
        let technique_id = self.config.technique_id.clone();
        let preparation_secs = self.config.preparation_secs;

        let ticker = tokio::spawn(async move {
            let mut ticks = interval(Duration::from_secs(1));
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick fires immediately; skip it so the
            // session holds its starting state for a full second.
            ticks.tick().await;

            loop {
                ticks.tick().await;

                let mut timer = timer.lock().await;
                match timer.tick() {
                    TickOutcome::Completed => {
                        let duration = timer.pattern().total_secs() + preparation_secs;
                        drop(timer);

                        info!("Session completed: {}", session_id);
                        if let Err(e) = sink
                            .record_completion(&technique_id, duration)
                            .await
                        {
                            error!("Failed to record completion: {}", e);
                        }
                        break;
                    }
                    TickOutcome::PhaseChanged(phase) => {
                        info!("Session {}: entering {:?}", session_id, phase);
                    }
                    TickOutcome::Running => {
                        if !timer.state().is_active {
                            // Stopped from outside; ticker winds down.
                            break;
                        }
                    }
                }
            }
        });

        let mut handle = self.ticker_handle.lock().await;
        *handle = Some(ticker);
    }

    pub async fn pause(&self) {
        let mut timer = self.timer.lock().await;
        timer.pause();
    }

    pub async fn resume(&self) {
        let mut timer = self.timer.lock().await;
        timer.resume();
    }

    /// Stop the session: cancel the ticker, discard progress.
    pub async fn stop(&self) {
        {
            let mut handle = self.ticker_handle.lock().await;
            if let Some(task) = handle.take() {
                task.abort();
            }
        }

        let mut timer = self.timer.lock().await;
        timer.stop();

        info!("Session stopped: {}", self.config.session_id);
    }

    pub async fn state(&self) -> SessionState {
        let timer = self.timer.lock().await;
        timer.state().clone()
    }
}
