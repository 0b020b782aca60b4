//! dinebot: terminal entry point for a table-ordering assistant session.

use anyhow::Result;
use clap::Parser;
use dinebot_cli::{run_chat, run_reset, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            business,
            table,
            snapshot,
            db,
            media_dir,
            log_file,
        } => run_chat(business, table, snapshot, db, media_dir, log_file).await,
        Commands::Reset {
            business,
            table,
            db,
        } => run_reset(business, table, db).await,
    }
}
