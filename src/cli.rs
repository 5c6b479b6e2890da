//! # gitbook-sync CLI Interface (Module)
//!
//! Command parsing and the async [`run`] entrypoint shared by `main()` and the
//! integration tests. All synchronisation logic lives in [`crate::synchronise`];
//! this module only turns flags into a [`crate::config::SyncRequest`], builds
//! the HTTP client and renders the outcome.
use crate::client::GitBookClient;
use crate::load_config::{resolve_request, Overrides};
use crate::progress::{ActionsProgress, Progress, TracingProgress};
use crate::synchronise::synchronise;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI for gitbook-sync: publish a directory of markdown files to a GitBook space.
#[derive(Parser)]
#[clap(
    name = "gitbook-sync",
    version,
    about = "Synchronise a directory of markdown files into a GitBook space"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or update one page per file of the directory. The API token is read from GITBOOK_TOKEN.
    Sync {
        /// Optional YAML config file; flags override its keys
        #[clap(long)]
        config: Option<PathBuf>,
        /// Directory of markdown files to publish
        #[clap(long)]
        dir: Option<PathBuf>,
        /// Title of the organization owning the space
        #[clap(long)]
        org: Option<String>,
        /// Name of the target space
        #[clap(long)]
        space: Option<String>,
        /// Group to place the pages under (created if missing)
        #[clap(long)]
        group: Option<String>,
        /// API endpoint, defaults to the public GitBook API
        #[clap(long)]
        api_endpoint: Option<String>,
        /// How stage progress is rendered
        #[clap(long, value_enum, default_value_t = ProgressFormat::Plain)]
        progress: ProgressFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProgressFormat {
    /// Structured tracing events
    Plain,
    /// GitHub Actions log groups
    Actions,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Sync {
            config,
            dir,
            org,
            space,
            group,
            api_endpoint,
            progress,
        } => {
            let overrides = Overrides {
                dir,
                org,
                space,
                group,
                api_endpoint,
            };
            let request = resolve_request(config.as_deref(), overrides)?;
            tracing::info!(command = "sync", "Starting synchronisation process");

            let client = GitBookClient::new(&request.remote_endpoint, &request.credential)
                .map_err(|e| anyhow::anyhow!("Failed to construct GitBook client: {e}"))?;
            let reporter: &dyn Progress = match progress {
                ProgressFormat::Plain => &TracingProgress,
                ProgressFormat::Actions => &ActionsProgress,
            };

            match synchronise(&request, &client, reporter).await {
                Ok(report) => {
                    tracing::info!(command = "sync", files = report.files.len(), "Synchronisation complete");
                    println!("Synchronise complete.\nReport:");
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&report)
                            .unwrap_or_else(|_| format!("{report:#?}"))
                    );
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "sync", error = %e, "Synchronisation failed");
                    eprintln!("[ERROR] Synchronisation failed: {e}");
                    reporter.error(&e.to_string());
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}
