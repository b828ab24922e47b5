use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One aligned character from the TTS provider: the character and the span
/// of audio it occupies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedChar {
    pub character: String,
    pub start_secs: f64,
    pub end_secs: f64,
}

/// A word coalesced from consecutive aligned characters. Start/end times
/// are the span of the word's first and last character.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedWord {
    pub text: String,
    pub start_secs: f64,
    pub end_secs: f64,
}

/// Alignment file as stored on disk. TTS providers ship either a flat list
/// of character triples or three parallel arrays; both are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AlignmentFile {
    Triples(Vec<AlignedChar>),
    Parallel {
        characters: Vec<String>,
        character_start_times_seconds: Vec<f64>,
        character_end_times_seconds: Vec<f64>,
    },
}

impl AlignmentFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<AlignedChar>> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read alignment file {}", path.display()))?;
        let file: AlignmentFile =
            serde_json::from_str(&raw).context("Failed to parse alignment JSON")?;
        file.into_chars()
    }

    pub fn into_chars(self) -> Result<Vec<AlignedChar>> {
        match self {
            AlignmentFile::Triples(chars) => Ok(chars),
            AlignmentFile::Parallel {
                characters,
                character_start_times_seconds,
                character_end_times_seconds,
            } => {
                if characters.len() != character_start_times_seconds.len()
                    || characters.len() != character_end_times_seconds.len()
                {
                    anyhow::bail!(
                        "Alignment arrays differ in length: {} characters, {} starts, {} ends",
                        characters.len(),
                        character_start_times_seconds.len(),
                        character_end_times_seconds.len()
                    );
                }

                Ok(characters
                    .into_iter()
                    .zip(character_start_times_seconds)
                    .zip(character_end_times_seconds)
                    .map(|((character, start_secs), end_secs)| AlignedChar {
                        character,
                        start_secs,
                        end_secs,
                    })
                    .collect())
            }
        }
    }
}

/// True for characters that terminate a word: whitespace, comma, period.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == '.'
}

/// Coalesce consecutive characters into words.
///
/// Separator characters are dropped; each word spans from its first
/// character's start time to its last character's end time. Words come out
/// time-ordered because the source characters are.
pub fn coalesce_words(chars: &[AlignedChar]) -> Vec<AlignedWord> {
    let mut words = Vec::new();
    let mut current: Option<AlignedWord> = None;

    for ac in chars {
        let is_sep = ac.character.chars().all(is_separator) && !ac.character.is_empty();

        if is_sep {
            if let Some(word) = current.take() {
                words.push(word);
            }
            continue;
        }

        match current.as_mut() {
            Some(word) => {
                word.text.push_str(&ac.character);
                word.end_secs = ac.end_secs;
            }
            None => {
                current = Some(AlignedWord {
                    text: ac.character.clone(),
                    start_secs: ac.start_secs,
                    end_secs: ac.end_secs,
                });
            }
        }
    }

    if let Some(word) = current.take() {
        words.push(word);
    }

    words
}

/// Total narration duration: the end time of the last aligned character.
pub fn total_duration(chars: &[AlignedChar]) -> f64 {
    chars.last().map(|c| c.end_secs).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars_of(text: &str, step: f64) -> Vec<AlignedChar> {
        text.chars()
            .enumerate()
            .map(|(i, c)| AlignedChar {
                character: c.to_string(),
                start_secs: i as f64 * step,
                end_secs: (i + 1) as f64 * step,
            })
            .collect()
    }

    #[test]
    fn coalesces_on_whitespace_comma_period() {
        let chars = chars_of("Inhala, dos.", 0.1);
        let words = coalesce_words(&chars);

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "Inhala");
        assert_eq!(words[1].text, "dos");
    }

    #[test]
    fn word_span_covers_first_to_last_char() {
        let chars = chars_of("ab cd", 0.1);
        let words = coalesce_words(&chars);

        assert_eq!(words.len(), 2);
        assert!((words[0].start_secs - 0.0).abs() < 1e-9);
        assert!((words[0].end_secs - 0.2).abs() < 1e-9);
        assert!((words[1].start_secs - 0.3).abs() < 1e-9);
        assert!((words[1].end_secs - 0.5).abs() < 1e-9);
    }

    #[test]
    fn empty_alignment_is_empty() {
        assert!(coalesce_words(&[]).is_empty());
        assert_eq!(total_duration(&[]), 0.0);
    }
}
