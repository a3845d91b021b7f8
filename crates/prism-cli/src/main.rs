//! Prism CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use prism_cli::cli::Cli;
use prism_cli::commands;

#[tokio::main]
async fn main() {
    // Load .env.local if it exists (for PRISM_API_URL etc.)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    if let Err(e) = commands::execute(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
