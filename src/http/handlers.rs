use super::state::{spawn_completion_reaper, AppState, COMPLETED_RETENTION};
use crate::cues::{extract_cues, AlignedChar, Language};
use crate::pattern::{find_pattern, technique_ids};
use crate::session::{ManagedSession, SessionConfig, SessionState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    /// Technique to practice (must exist in the catalog)
    pub technique_id: String,

    /// Preparation seconds before the first inhale (default from config)
    pub preparation_secs: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: String,
    pub technique_id: String,
    pub state: SessionState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub session_id: String,
    pub state: SessionState,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /sessions/start
/// Create a timer-driven session and start its ticker
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> impl IntoResponse {
    let Some(pattern) = find_pattern(&req.technique_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Unknown technique: {}", req.technique_id),
            }),
        )
            .into_response();
    };

    let preparation = req
        .preparation_secs
        .unwrap_or(state.default_preparation_secs);

    let config = SessionConfig::new(req.technique_id.clone(), preparation);
    let session_id = config.session_id.clone();

    info!(
        "Starting session {} (technique={}, preparation={}s)",
        session_id, req.technique_id, preparation
    );

    let session = Arc::new(ManagedSession::new(
        config,
        pattern,
        Arc::clone(&state.sink),
    ));
    session.start().await;

    let snapshot = session.state().await;

    {
        let mut sessions = state.sessions.write().await;
        sessions.insert(session_id.clone(), Arc::clone(&session));
    }

    // Evict the entry once the session completes so the registry does
    // not grow without bound.
    spawn_completion_reaper(&state, session, COMPLETED_RETENTION);

    (
        StatusCode::OK,
        Json(StartSessionResponse {
            session_id,
            technique_id: req.technique_id,
            state: snapshot,
        }),
    )
        .into_response()
}

/// POST /sessions/:session_id/pause
pub async fn pause_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => {
            session.pause().await;
            let snapshot = session.state().await;
            (
                StatusCode::OK,
                Json(CommandResponse {
                    session_id,
                    state: snapshot,
                }),
            )
                .into_response()
        }
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/resume
pub async fn resume_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => {
            session.resume().await;
            let snapshot = session.state().await;
            (
                StatusCode::OK,
                Json(CommandResponse {
                    session_id,
                    state: snapshot,
                }),
            )
                .into_response()
        }
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/stop
/// Stop a session, cancel its ticker, and drop it from the registry
pub async fn stop_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let session = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    match session {
        Some(session) => {
            session.stop().await;
            let snapshot = session.state().await;
            info!("Session stopped via API: {}", session_id);
            (
                StatusCode::OK,
                Json(CommandResponse {
                    session_id,
                    state: snapshot,
                }),
            )
                .into_response()
        }
        None => not_found(&session_id),
    }
}

/// GET /sessions/:session_id/state
pub async fn get_session_state(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => {
            let snapshot = session.state().await;
            (StatusCode::OK, Json(snapshot)).into_response()
        }
        None => not_found(&session_id),
    }
}

/// GET /techniques
pub async fn list_techniques() -> impl IntoResponse {
    (StatusCode::OK, Json(technique_ids())).into_response()
}

/// GET /techniques/:technique_id
pub async fn get_technique(Path(technique_id): Path<String>) -> impl IntoResponse {
    match find_pattern(&technique_id) {
        Some(pattern) => (StatusCode::OK, Json(pattern)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Unknown technique: {}", technique_id),
            }),
        )
            .into_response(),
    }
}

/// GET /artifacts/:technique_id/:voice_id
/// Serve the cue artifact for a (technique, voice) pair; clients use it
/// to run audio-driven sessions and fall back to the timer on 404
pub async fn get_artifact(
    State(state): State<AppState>,
    Path((technique_id, voice_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.artifacts.load(&technique_id, &voice_id) {
        Ok(artifact) => (StatusCode::OK, Json(artifact)).into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No artifact for {}/{}", technique_id, voice_id),
            }),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractArtifactRequest {
    pub technique_id: String,
    pub voice_id: String,

    /// Narration language (service default when omitted)
    pub language: Option<Language>,

    /// Character-level alignment from the TTS provider
    pub alignment: Vec<AlignedChar>,
}

/// POST /artifacts/extract
/// Run cue extraction over an uploaded alignment and cache the artifact
pub async fn extract_artifact(
    State(state): State<AppState>,
    Json(req): Json<ExtractArtifactRequest>,
) -> impl IntoResponse {
    let language = req.language.unwrap_or(state.default_language);
    let artifact = extract_cues(&req.alignment, &req.technique_id, &req.voice_id, language);

    info!(
        "Extracted {} cues for {}/{}",
        artifact.cues.len(),
        req.technique_id,
        req.voice_id
    );

    match state.artifacts.save(&artifact) {
        Ok(_) => (StatusCode::OK, Json(artifact)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to save artifact: {}", e),
            }),
        )
            .into_response(),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn not_found(session_id: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Session {} not found", session_id),
        }),
    )
        .into_response()
}
