use anyhow::Result;
use serde::Deserialize;

use crate::cues::Language;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub sessions: SessionsConfig,
    pub artifacts: ArtifactsConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct SessionsConfig {
    /// Default preparation time before the first inhale
    pub preparation_secs: u32,

    /// Default narration language for cue extraction
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory holding cached cue artifacts
    pub path: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
