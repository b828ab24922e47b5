// Integration tests for server-held sessions
//
// Runs the ticker task against tokio's paused clock so the 1 Hz cadence
// is deterministic.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use calma_sessions::{
    BreathPhase, BreathingPattern, CompletionSink, ManagedSession, SessionConfig,
};

#[derive(Default)]
struct RecordingSink {
    completions: Mutex<Vec<(String, u32)>>,
}

#[async_trait]
impl CompletionSink for RecordingSink {
    async fn record_completion(&self, technique_id: &str, duration_secs: u32) -> Result<()> {
        self.completions
            .lock()
            .unwrap()
            .push((technique_id.to_string(), duration_secs));
        Ok(())
    }
}

fn short_session(sink: Arc<RecordingSink>) -> ManagedSession {
    // 1s inhale + 1s exhale, two cycles: 4 seconds total
    let pattern = BreathingPattern::new(1, 0, 1, 0, 2).unwrap();
    let config = SessionConfig::new("extended-exhale", 0);
    ManagedSession::new(config, pattern, sink)
}

#[tokio::test(start_paused = true)]
async fn ticker_advances_the_session() {
    let sink = Arc::new(RecordingSink::default());
    let session = short_session(Arc::clone(&sink));
    session.start().await;

    let initial = session.state().await;
    assert!(initial.is_active);
    assert_eq!(initial.total_time_remaining, 4);

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let after = session.state().await;
    assert!(after.total_time_remaining < 4);
}

#[tokio::test(start_paused = true)]
async fn completion_reaches_the_sink_exactly_once() {
    let sink = Arc::new(RecordingSink::default());
    let session = short_session(Arc::clone(&sink));
    session.start().await;

    tokio::time::sleep(Duration::from_secs(10)).await;

    let state = session.state().await;
    assert_eq!(state.current_phase, BreathPhase::Complete);
    assert!(!state.is_active);

    let completions = sink.completions.lock().unwrap();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0], ("extended-exhale".to_string(), 4));
}

#[tokio::test(start_paused = true)]
async fn pausing_freezes_the_server_session() {
    let sink = Arc::new(RecordingSink::default());
    let session = short_session(Arc::clone(&sink));
    session.start().await;

    tokio::time::sleep(Duration::from_millis(1500)).await;
    session.pause().await;
    let frozen = session.state().await;

    tokio::time::sleep(Duration::from_secs(5)).await;

    let after = session.state().await;
    assert_eq!(after.total_time_remaining, frozen.total_time_remaining);
    assert!(after.is_paused);
    assert!(sink.completions.lock().unwrap().is_empty());

    session.resume().await;
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(session.state().await.current_phase, BreathPhase::Complete);
}

#[tokio::test(start_paused = true)]
async fn restart_replaces_the_ticker() {
    let sink = Arc::new(RecordingSink::default());
    let session = short_session(Arc::clone(&sink));
    session.start().await;

    tokio::time::sleep(Duration::from_millis(1500)).await;
    session.start().await;
    assert_eq!(session.state().await.total_time_remaining, 4);

    // Exactly one ticker may drive the restarted session: two seconds of
    // clock move it by exactly two ticks. A leaked first ticker would
    // advance it twice as fast.
    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(session.state().await.total_time_remaining, 2);
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_the_ticker_and_resets() {
    let sink = Arc::new(RecordingSink::default());
    let session = short_session(Arc::clone(&sink));
    session.start().await;

    tokio::time::sleep(Duration::from_millis(1500)).await;
    session.stop().await;

    let state = session.state().await;
    assert!(!state.is_active);
    assert_eq!(state.current_phase, BreathPhase::Inhale);
    assert_eq!(state.total_time_remaining, 4);

    // With the ticker cancelled, nothing moves and nothing completes.
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(session.state().await.total_time_remaining, 4);
    assert!(sink.completions.lock().unwrap().is_empty());
}
