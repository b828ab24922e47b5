use serde::{Deserialize, Serialize};

/// Configuration for one session.
///
/// Preferences (preparation time, technique) come in here at construction;
/// the controllers never read ambient storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "session-<uuid>")
    pub session_id: String,

    /// Technique the session practices
    pub technique_id: String,

    /// Seconds of preparation before the first inhale (0 = none)
    pub preparation_secs: u32,
}

impl SessionConfig {
    pub fn new(technique_id: impl Into<String>, preparation_secs: u32) -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            technique_id: technique_id.into(),
            preparation_secs,
        }
    }
}
