use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use calma_sessions::{
    create_router, extract_cues, AlignmentFile, AppState, ArtifactStore, Config, Language,
    LoggingSink, NarrationFile,
};

#[derive(Parser)]
#[command(name = "calma-sessions", about = "Guided breathing session engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP session service
    Serve {
        /// Config file (without extension), loaded via the config crate
        #[arg(long, default_value = "config/calma-sessions")]
        config: String,
    },

    /// Extract a cue artifact from a narration alignment
    ExtractCues {
        /// Character-level alignment JSON from the TTS provider
        #[arg(long)]
        alignment: PathBuf,

        /// Technique the narration was generated for
        #[arg(long)]
        technique: String,

        /// Voice the narration was generated with
        #[arg(long)]
        voice: String,

        /// Narration language
        #[arg(long, value_enum, default_value = "es")]
        language: Language,

        /// Rendered narration WAV, for a duration cross-check
        #[arg(long)]
        audio: Option<PathBuf>,

        /// Artifact output directory
        #[arg(long, default_value = "artifacts")]
        out: PathBuf,
    },

    /// Summarize a cue artifact
    Inspect {
        #[arg(long)]
        artifact: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config } => serve(&config).await,
        Command::ExtractCues {
            alignment,
            technique,
            voice,
            language,
            audio,
            out,
        } => extract(&alignment, &technique, &voice, language, audio.as_deref(), &out),
        Command::Inspect { artifact } => inspect(&artifact),
    }
}

async fn serve(config_path: &str) -> Result<()> {
    let cfg = Config::load(config_path)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Artifact store: {}", cfg.artifacts.path);

    let state = AppState::new(
        Arc::new(LoggingSink),
        ArtifactStore::new(cfg.artifacts.path.as_str()),
        cfg.sessions.preparation_secs,
        cfg.sessions.language,
    );
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn extract(
    alignment_path: &std::path::Path,
    technique: &str,
    voice: &str,
    language: Language,
    audio: Option<&std::path::Path>,
    out: &std::path::Path,
) -> Result<()> {
    let chars = AlignmentFile::load(alignment_path)?;
    let artifact = extract_cues(&chars, technique, voice, language);

    info!(
        "Extracted {} cues over {:.1}s for {}/{}",
        artifact.cues.len(),
        artifact.total_duration,
        technique,
        voice
    );

    if let Some(wav_path) = audio {
        let narration = NarrationFile::open(wav_path)?;
        if !narration.matches_duration(artifact.total_duration) {
            warn!(
                "Alignment duration {:.1}s does not match narration {:.1}s; \
                 the alignment may be stale",
                artifact.total_duration, narration.duration_seconds
            );
        }
    }

    let store = ArtifactStore::new(out);
    let path = store.save(&artifact)?;
    println!("Wrote {}", path.display());

    Ok(())
}

fn inspect(path: &std::path::Path) -> Result<()> {
    let artifact = ArtifactStore::load_file(path)?;

    let phase_cues = artifact.cues.iter().filter(|c| c.count.is_none()).count();
    let count_cues = artifact.cues.len() - phase_cues;

    println!("Technique: {}", artifact.technique_id);
    println!("Voice:     {}", artifact.voice_id);
    println!("Duration:  {:.1}s", artifact.total_duration);
    println!(
        "Cues:      {} ({} phase, {} count)",
        artifact.cues.len(),
        phase_cues,
        count_cues
    );

    Ok(())
}
