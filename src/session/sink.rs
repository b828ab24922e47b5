use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Boundary for recording a finished session. Invoked exactly once per
/// completion with the technique id and the session's duration.
#[async_trait]
pub trait CompletionSink: Send + Sync {
    async fn record_completion(&self, technique_id: &str, duration_secs: u32) -> Result<()>;
}

/// Default sink: logs the completion and nothing else. Real persistence
/// lives behind this trait in the hosting application.
#[derive(Debug, Default)]
pub struct LoggingSink;

#[async_trait]
impl CompletionSink for LoggingSink {
    async fn record_completion(&self, technique_id: &str, duration_secs: u32) -> Result<()> {
        info!(
            "Session completed: technique={}, duration={}s",
            technique_id, duration_secs
        );
        Ok(())
    }
}
