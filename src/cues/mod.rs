//! Audio cue extraction
//!
//! Narration timing (pauses, prosody) is not predictable at authoring
//! time, so phase boundaries for voice-guided sessions are derived from
//! the rendered audio itself: a character-level alignment from the TTS
//! provider is coalesced into words, matched against per-language keyword
//! tables, and reduced to a sparse, time-ordered cue list. The resulting
//! `AudioTimestamps` artifact is generated once per (technique, voice)
//! pair and cached.

mod alignment;
mod extractor;
mod keywords;
mod store;

pub use alignment::{coalesce_words, total_duration, AlignedChar, AlignedWord, AlignmentFile};
pub use extractor::{extract_cues, AudioCue, AudioTimestamps};
pub use keywords::{normalize, number_word, phase_keyword, Language};
pub use store::ArtifactStore;
