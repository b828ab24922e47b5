use crate::cues::{ArtifactStore, Language};
use crate::pattern::BreathPhase;
use crate::session::{CompletionSink, ManagedSession};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::info;

/// How long a completed session stays readable before it is evicted from
/// the registry.
pub const COMPLETED_RETENTION: Duration = Duration::from_secs(60);

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active sessions (session_id → session)
    pub sessions: Arc<RwLock<HashMap<String, Arc<ManagedSession>>>>,

    /// Completion recording boundary, shared by all sessions
    pub sink: Arc<dyn CompletionSink>,

    /// Cached cue artifacts served to audio-driven clients
    pub artifacts: ArtifactStore,

    /// Default preparation seconds applied when the request omits one
    pub default_preparation_secs: u32,

    /// Default narration language for artifact extraction
    pub default_language: Language,
}

impl AppState {
    pub fn new(
        sink: Arc<dyn CompletionSink>,
        artifacts: ArtifactStore,
        default_preparation_secs: u32,
        default_language: Language,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            sink,
            artifacts,
            default_preparation_secs,
            default_language,
        }
    }
}

/// Evict a session from the registry once it completes.
///
/// The entry is kept for a retention window after completion so clients
/// can still read the final state. A session stopped from outside ends
/// the watch early; the stop handler already removed its entry.
pub fn spawn_completion_reaper(
    state: &AppState,
    session: Arc<ManagedSession>,
    retention: Duration,
) -> JoinHandle<()> {
    let sessions = Arc::clone(&state.sessions);
    let session_id = session.session_id().to_string();

    tokio::spawn(async move {
        loop {
            sleep(Duration::from_secs(1)).await;

            let snapshot = session.state().await;
            if snapshot.current_phase == BreathPhase::Complete {
                sleep(retention).await;
                let mut sessions = sessions.write().await;
                sessions.remove(&session_id);
                info!("Reaped completed session: {}", session_id);
                break;
            }
            if !snapshot.is_active {
                break;
            }
        }
    })
}
