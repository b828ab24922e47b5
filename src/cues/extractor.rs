use serde::{Deserialize, Serialize};

use super::alignment::{coalesce_words, total_duration, AlignedChar};
use super::keywords::{normalize, number_word, phase_keyword, Language};
use crate::pattern::BreathPhase;

/// A point event extracted from narration: a phase-transition word or a
/// spoken count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioCue {
    /// The word spoken, case-folded
    pub word: String,

    /// Start time in seconds from audio start
    pub time: f64,

    /// Phase this cue belongs to; absent for counts spoken before any
    /// phase keyword
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<BreathPhase>,

    /// Spoken count (1..=8); absent on phase-transition cues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u8>,
}

/// Cue artifact for one (technique, voice) narration. Generated once by
/// the extractor, cached, and read-only at session time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTimestamps {
    pub technique_id: String,
    pub voice_id: String,

    /// Total narration duration in seconds
    pub total_duration: f64,

    /// Cues ordered by time
    pub cues: Vec<AudioCue>,
}

impl AudioTimestamps {
    /// Whether the artifact can drive a session: at least one cue and a
    /// positive duration.
    pub fn is_usable(&self) -> bool {
        !self.cues.is_empty() && self.total_duration > 0.0
    }
}

/// Extract phase and count cues from a character-level alignment.
///
/// Pure and idempotent: the same alignment always yields the same cue
/// sequence. An empty alignment yields an empty cue list and zero
/// duration. Output cues are time-ordered because source words are.
pub fn extract_cues(
    chars: &[AlignedChar],
    technique_id: &str,
    voice_id: &str,
    language: Language,
) -> AudioTimestamps {
    let words = coalesce_words(chars);

    let mut cues = Vec::new();
    let mut running_phase: Option<BreathPhase> = None;

    for word in &words {
        let folded = word.text.to_lowercase();
        let token = normalize(&word.text);

        if let Some(phase) = phase_keyword(language, &token) {
            running_phase = Some(phase);
            cues.push(AudioCue {
                word: folded,
                time: word.start_secs,
                phase: Some(phase),
                count: None,
            });
            continue;
        }

        if let Some(count) = number_word(language, &token) {
            cues.push(AudioCue {
                word: folded,
                time: word.start_secs,
                phase: running_phase,
                count: Some(count),
            });
        }
    }

    AudioTimestamps {
        technique_id: technique_id.to_string(),
        voice_id: voice_id.to_string(),
        total_duration: total_duration(chars),
        cues,
    }
}
