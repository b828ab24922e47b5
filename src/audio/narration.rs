use anyhow::{Context, Result};
use hound::WavReader;
use std::path::Path;
use tracing::info;

/// Cue times and the playback clock both count from audio start, so an
/// artifact whose duration disagrees with the rendered WAV by more than
/// this is treated as stale.
const DURATION_TOLERANCE_SECS: f64 = 0.5;

/// Metadata of a rendered narration WAV file.
pub struct NarrationFile {
    pub path: String,
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
}

impl NarrationFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening narration file: {}", path.display());

        let reader = WavReader::open(path).context("Failed to open WAV file")?;

        let spec = reader.spec();
        let duration_seconds = reader.duration() as f64 / spec.sample_rate as f64;

        info!(
            "Narration loaded: {:.1}s, {}Hz, {} channels",
            duration_seconds, spec.sample_rate, spec.channels
        );

        Ok(Self {
            path: path.display().to_string(),
            duration_seconds,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
        })
    }

    /// Check an artifact duration against the rendered audio.
    pub fn matches_duration(&self, artifact_duration_secs: f64) -> bool {
        (self.duration_seconds - artifact_duration_secs).abs() <= DURATION_TOLERANCE_SECS
    }
}
