//! HTTP API for session control (companion clients)
//!
//! This module provides a REST API for driving server-held timer sessions:
//! - POST /sessions/start - Create and start a session
//! - POST /sessions/:id/pause - Suspend ticking
//! - POST /sessions/:id/resume - Resume ticking
//! - POST /sessions/:id/stop - Stop and discard the session
//! - GET /sessions/:id/state - Query session state
//! - GET /techniques - Technique catalog
//! - GET /artifacts/:technique/:voice - Cue artifact for audio-driven clients
//! - POST /artifacts/extract - Extract and cache a cue artifact
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::{spawn_completion_reaper, AppState, COMPLETED_RETENTION};
