use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::extractor::AudioTimestamps;

/// File-backed cache of cue artifacts, one JSON file per
/// (technique, voice) pair.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn artifact_path(&self, technique_id: &str, voice_id: &str) -> PathBuf {
        self.dir.join(format!("{}--{}.json", technique_id, voice_id))
    }

    pub fn exists(&self, technique_id: &str, voice_id: &str) -> bool {
        self.artifact_path(technique_id, voice_id).is_file()
    }

    /// Persist an artifact, creating the store directory if needed.
    pub fn save(&self, artifact: &AudioTimestamps) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create artifact directory {}", self.dir.display())
        })?;

        let path = self.artifact_path(&artifact.technique_id, &artifact.voice_id);
        let json =
            serde_json::to_string_pretty(artifact).context("Failed to serialize artifact")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write artifact {}", path.display()))?;

        info!(
            "Saved cue artifact: {} ({} cues, {:.1}s)",
            path.display(),
            artifact.cues.len(),
            artifact.total_duration
        );

        Ok(path)
    }

    /// Load the artifact for a (technique, voice) pair. Absent or
    /// malformed files surface as errors; the caller maps either case to
    /// timer fallback.
    pub fn load(&self, technique_id: &str, voice_id: &str) -> Result<AudioTimestamps> {
        let path = self.artifact_path(technique_id, voice_id);
        Self::load_file(&path)
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<AudioTimestamps> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read artifact {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Malformed artifact {}", path.display()))
    }
}
