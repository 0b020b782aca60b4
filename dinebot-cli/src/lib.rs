//! # dinebot-cli
//!
//! CLI surface and composition root: argument definitions, domain snapshot
//! loading, dependency wiring, and the terminal REPL.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use assistant_client::{AssistantConfig, EnvAssistantConfig, OpenAIAssistantBackend};
use clap::{Parser, Subcommand};
use dinebot_core::{init_tracing, DomainSnapshot, SessionKey};
use session::{SessionConfig, SessionController};
use storage::{
    FeedbackRepository, FilesystemMediaStore, OrderHistoryRepository,
    ServiceRequestRepository, SqlitePoolManager, TranscriptRepository,
};
use tracing::info;

pub mod repl;

#[derive(Parser)]
#[command(name = "dinebot", about = "Conversational table-ordering assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an interactive session for one (business, table) pairing.
    Chat {
        /// Business identifier.
        #[arg(long)]
        business: String,
        /// Table identifier.
        #[arg(long)]
        table: String,
        /// Path to the domain snapshot JSON (menu, combos, events, profile).
        #[arg(long)]
        snapshot: PathBuf,
        /// SQLite database path.
        #[arg(long, default_value = "dinebot.db")]
        db: String,
        /// Directory for uploaded feedback media.
        #[arg(long, default_value = "media")]
        media_dir: String,
        /// Log file path.
        #[arg(long, default_value = "dinebot.log")]
        log_file: String,
    },
    /// Clear a session's transcript. Order history is kept.
    Reset {
        #[arg(long)]
        business: String,
        #[arg(long)]
        table: String,
        #[arg(long, default_value = "dinebot.db")]
        db: String,
    },
}

/// Loads the read-only domain snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<DomainSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

/// Builds a fully wired session controller: env-configured backend, SQLite
/// repositories, SQLite-backed dispatcher and feedback sink, filesystem media
/// store.
pub async fn build_controller(
    business: String,
    table: String,
    snapshot_path: &Path,
    db: &str,
    media_dir: &str,
) -> Result<SessionController> {
    let snapshot = load_snapshot(snapshot_path)?;
    let assistant_cfg = EnvAssistantConfig::from_env()?;

    let backend = Arc::new(
        OpenAIAssistantBackend::with_base_url(
            assistant_cfg.api_key().to_string(),
            assistant_cfg.base_url().to_string(),
        )
        .with_model(assistant_cfg.model().to_string()),
    );

    let pool = SqlitePoolManager::new(db).await?;
    let transcript = TranscriptRepository::new(pool.clone()).await?;
    let orders = OrderHistoryRepository::new(pool.clone()).await?;
    let dispatcher = Arc::new(ServiceRequestRepository::new(pool.clone()).await?);
    let feedback_sink = Arc::new(FeedbackRepository::new(pool).await?);
    let uploader = Arc::new(FilesystemMediaStore::new(media_dir));

    let config = SessionConfig {
        backend_timeout: Duration::from_secs(assistant_cfg.timeout_secs()),
        ..Default::default()
    };

    info!(business = %business, table = %table, "Session wired");
    Ok(SessionController::new(
        SessionKey::new(business, table),
        snapshot,
        backend,
        uploader,
        dispatcher,
        feedback_sink,
        transcript,
        orders,
        config,
    ))
}

/// `chat` subcommand: wire the session and hand it to the REPL.
pub async fn run_chat(
    business: String,
    table: String,
    snapshot: PathBuf,
    db: String,
    media_dir: String,
    log_file: String,
) -> Result<()> {
    init_tracing(&log_file)?;
    let controller = build_controller(business, table, &snapshot, &db, &media_dir).await?;
    repl::run(controller).await
}

/// `reset` subcommand: clear the transcript for one session.
pub async fn run_reset(business: String, table: String, db: String) -> Result<()> {
    let pool = SqlitePoolManager::new(&db).await?;
    let transcript = TranscriptRepository::new(pool).await?;
    let key = SessionKey::new(business, table);
    let deleted = transcript.clear(&key).await?;
    println!(
        "Cleared {} turn(s) for business {} table {}.",
        deleted, key.business_id, key.table_id
    );
    Ok(())
}
