//! Keyword tables for cue extraction.
//!
//! Matching is done against normalized tokens (case-folded, accents
//! stripped) with explicit per-language lookup tables. Every entry is
//! enumerated in the tests below; no substring heuristics.

use serde::{Deserialize, Serialize};

use crate::pattern::BreathPhase;

/// Narration languages with keyword tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
}

impl Default for Language {
    fn default() -> Self {
        Language::Es
    }
}

/// Case-fold a token and strip the accented characters the supported
/// languages use.
pub fn normalize(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' => 'a',
            'é' | 'è' => 'e',
            'í' | 'ì' => 'i',
            'ó' | 'ò' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

const EN_PHASES: &[(&str, BreathPhase)] = &[
    ("inhale", BreathPhase::Inhale),
    ("exhale", BreathPhase::Exhale),
    ("hold", BreathPhase::HoldIn),
    ("pause", BreathPhase::HoldOut),
    ("welcome", BreathPhase::Prepare),
    ("hello", BreathPhase::Prepare),
    ("ready", BreathPhase::Prepare),
    ("begin", BreathPhase::Prepare),
];

const ES_PHASES: &[(&str, BreathPhase)] = &[
    ("inhala", BreathPhase::Inhale),
    ("exhala", BreathPhase::Exhale),
    ("sosten", BreathPhase::HoldIn),
    ("manten", BreathPhase::HoldIn),
    ("pausa", BreathPhase::HoldOut),
    ("hola", BreathPhase::Prepare),
    ("bienvenido", BreathPhase::Prepare),
    ("bienvenida", BreathPhase::Prepare),
    ("comencemos", BreathPhase::Prepare),
    ("preparate", BreathPhase::Prepare),
];

// Counts go up to eight: the longest hold in the catalog is 8 seconds.
const EN_NUMBERS: &[(&str, u8)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
];

const ES_NUMBERS: &[(&str, u8)] = &[
    ("uno", 1),
    ("dos", 2),
    ("tres", 3),
    ("cuatro", 4),
    ("cinco", 5),
    ("seis", 6),
    ("siete", 7),
    ("ocho", 8),
];

/// Phase keyword lookup over a normalized token.
pub fn phase_keyword(language: Language, normalized: &str) -> Option<BreathPhase> {
    let table = match language {
        Language::En => EN_PHASES,
        Language::Es => ES_PHASES,
    };
    table
        .iter()
        .find(|(word, _)| *word == normalized)
        .map(|(_, phase)| *phase)
}

/// Number word lookup over a normalized token.
pub fn number_word(language: Language, normalized: &str) -> Option<u8> {
    let table = match language {
        Language::En => EN_NUMBERS,
        Language::Es => ES_NUMBERS,
    };
    table
        .iter()
        .find(|(word, _)| *word == normalized)
        .map(|(_, count)| *count)
}
