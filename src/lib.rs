pub mod audio;
pub mod config;
pub mod cues;
pub mod http;
pub mod pattern;
pub mod session;

pub use audio::NarrationFile;
pub use config::Config;
pub use cues::{
    extract_cues, AlignedChar, AlignmentFile, ArtifactStore, AudioCue, AudioTimestamps, Language,
};
pub use http::{create_router, AppState};
pub use pattern::{find_pattern, BreathPhase, BreathingPattern};
pub use session::{
    select_mode, AudioDrivenSession, AudioDrivenState, AudioUpdate, CompletionSink, LoggingSink,
    ManagedSession, SessionConfig, SessionMode, SessionState, TickOutcome, TimerSession,
};
