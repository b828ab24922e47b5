//! Breathing session controllers
//!
//! Two drivers share one phase vocabulary and are mutually exclusive per
//! session:
//! - `TimerSession` advances phases on a 1 Hz tick from the pattern's
//!   configured durations.
//! - `AudioDrivenSession` derives phase and progress from the narration's
//!   playback position against an extracted cue list.
//!
//! `select_mode` picks the driver before the session starts; nothing is
//! shared between them afterwards.

mod audio;
mod config;
mod runtime;
mod sink;
mod timer;

pub use audio::{AudioDrivenSession, AudioDrivenState, AudioUpdate};
pub use config::SessionConfig;
pub use runtime::ManagedSession;
pub use sink::{CompletionSink, LoggingSink};
pub use timer::{SessionState, TickOutcome, TimerSession};

use crate::cues::AudioTimestamps;

/// Which driver a session will use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Narrated audio is available and its cue artifact is usable
    Audio,

    /// Fixed-timer fallback
    Timer,
}

/// Choose the session driver: audio when a usable cue artifact exists,
/// timer otherwise. Absent, empty, or zero-duration artifacts all fall
/// back to the timer.
pub fn select_mode(artifact: Option<&AudioTimestamps>) -> SessionMode {
    match artifact {
        Some(a) if a.is_usable() => SessionMode::Audio,
        _ => SessionMode::Timer,
    }
}
