// Dignity Index Evaluator
// Scores a statement on the 8-point Dignity Index via Gemini and renders the result card.

mod cli;
mod client;
mod config;
mod controller;
mod error;
mod models;
mod presentation;
mod render;
mod telemetry;

#[cfg(test)]
mod tests;

use clap::Parser;
use cli::{Cli, Commands};
use client::GeminiClient;
use config::AnalyzerConfig;
use controller::{AnalysisController, ConsoleNotifier};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // A missing .env is fine; the environment may already carry the key.
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose, cli.log_json);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = AnalyzerConfig::from_env()?
        .with_overrides(cli.overrides())
        .validated()?;
    debug!(?config, "Configuration loaded");

    let client = Arc::new(GeminiClient::new(&config)?);
    info!("Using endpoint {}", client.endpoint());
    let controller = AnalysisController::new(client, Arc::new(ConsoleNotifier));

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Analyze { text, file, format } => {
            let text = cli::read_input(text, file.as_ref(), &mut io::stdin().lock())?;
            let rendered = cli::run_analyze(&controller, text, format, &mut stdout).await?;
            Ok(if rendered {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Interactive { format } => {
            let reader = tokio::io::BufReader::new(tokio::io::stdin());
            cli::run_interactive(&controller, reader, format, &mut stdout).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
