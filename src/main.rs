//! Binary entrypoint: loads `.env`, sets up tracing and hands the parsed CLI to [`run`].
use anyhow::Result;
use clap::Parser;
use gitbook_sync::cli::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Only the working directory's `.env`; parents are not searched.
    dotenvy::from_path(".env").ok();

    // Logs go to stderr so stdout stays free for the report and workflow commands.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::info!("CLI application startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    let result = run(cli).await;
    match &result {
        Ok(_) => tracing::info!("CLI completed successfully"),
        Err(e) => tracing::error!(error = %e, "CLI exited with error"),
    }
    result
}
