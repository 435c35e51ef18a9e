//! HAMS dashboard command line client

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use hams_dashboard::{
    config::AppConfig,
    logging,
    services::notify::ConsoleNotifier,
    AppError, Dashboard,
};

mod cli;
mod commands;
mod render;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config_dir).context("Failed to load configuration")?;

    logging::init(&config.logging).context("Failed to initialize logging")?;
    tracing::debug!("Using backend {}", config.api.url);

    let notifier = Arc::new(ConsoleNotifier::new());
    let dashboard = Dashboard::from_config(config, notifier.clone()).context("Failed to open session")?;

    let shown_before = notifier.errors_shown();
    match commands::run(&dashboard, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            // Mutation flows already toasted their failure
            if notifier.errors_shown() == shown_before {
                eprintln!("error: {}", e.toast_message());
            }
            if matches!(e, AppError::Unauthorized(_)) {
                eprintln!("Your session has ended. Run `hams login` to sign in again.");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
