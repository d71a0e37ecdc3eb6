//! Worksync CLI
//!
//! Command-line lifecycle hooks for workspace synchronization.
//!
//! # Commands
//!
//! - `pull` - Run the start-of-life pull (remote copy wins if strictly newer)
//! - `push` - Run the end-of-life push (revision stripped, remote assigns a new one)
//! - `version` - Show build information
//!
//! Remote settings come from flags, falling back to `WORKSYNC_*` environment
//! variables. A failed sync never produces a non-zero exit code: the host
//! lifecycle must not be aborted by a sync failure.

mod commands;
mod http;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use worksync_engine::SyncSettings;

/// Workspace synchronization lifecycle hooks.
#[derive(Parser)]
#[command(name = "worksync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the local workspace file
    #[arg(global = true, short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Workspace filename base (".json" is appended)
    #[arg(global = true, long)]
    workspace_filename: Option<String>,

    /// Remote workspace id (<= 0 disables sync)
    #[arg(global = true, long)]
    workspace_id: Option<i64>,

    /// Remote API base URL
    #[arg(global = true, long)]
    api_url: Option<String>,

    /// Remote API key
    #[arg(global = true, long)]
    api_key: Option<String>,

    /// Remote API secret
    #[arg(global = true, long)]
    api_secret: Option<String>,

    /// Payload passphrase (enables client-side encryption)
    #[arg(global = true, long)]
    passphrase: Option<String>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull the remote workspace into the local file (start of life)
    Pull,

    /// Push the local workspace to the remote service (end of life)
    Push,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Pull => {
            let settings = build_settings(&cli);
            commands::pull::run(settings)?;
        }
        Commands::Push => {
            let settings = build_settings(&cli);
            commands::push::run(settings)?;
        }
        Commands::Version => {
            println!("worksync {}", env!("CARGO_PKG_VERSION"));
            println!("agent: {}", worksync_client::AGENT);
        }
    }

    Ok(())
}

/// Resolves settings once, before any sync runs: flags first, then
/// `WORKSYNC_*` environment variables.
fn build_settings(cli: &Cli) -> SyncSettings {
    let env = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

    let workspace_id = cli
        .workspace_id
        .or_else(|| env("WORKSYNC_WORKSPACE_ID").and_then(|v| v.parse().ok()))
        .unwrap_or(0);

    let mut settings = SyncSettings::new(cli.data_dir.clone(), workspace_id)
        .with_remote_api(
            cli.api_url.clone().or_else(|| env("WORKSYNC_API_URL")).unwrap_or_default(),
            cli.api_key.clone().or_else(|| env("WORKSYNC_API_KEY")).unwrap_or_default(),
            cli.api_secret
                .clone()
                .or_else(|| env("WORKSYNC_API_SECRET"))
                .unwrap_or_default(),
        )
        .with_passphrase(cli.passphrase.clone().or_else(|| env("WORKSYNC_PASSPHRASE")))
        .with_username_from_env();

    if let Some(name) = &cli.workspace_filename {
        settings = settings.with_workspace_filename(name.clone());
    }

    settings
}
