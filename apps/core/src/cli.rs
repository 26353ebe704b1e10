use crate::client::DignityClassifier;
use crate::config::{ConfigOverrides, ENV_API_BASE, ENV_MODEL};
use crate::controller::{AnalysisController, SubmitOutcome};
use crate::error::AppError;
use crate::presentation::ResultCard;
use crate::render::{render_json, render_text};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable result card
    Text,
    /// Result card as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "dignity-index")]
#[command(about = "Score text on the 8-point Dignity Index, from contempt to dignity", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Gemini model to use
    #[arg(long, global = true, env = ENV_MODEL)]
    pub model: Option<String>,

    /// API base URL (scheme and host)
    #[arg(long, global = true, env = ENV_API_BASE)]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one piece of text
    Analyze {
        /// Text to analyze (reads stdin when neither TEXT nor --file is given)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Prompt for text repeatedly; `:last` reprints the current result, `:quit` exits
    Interactive {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            model: self.model.clone(),
            api_base: self.api_base.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Resolves the text for `analyze` from the argument, a file, or `stdin`.
pub fn read_input(
    text: Option<String>,
    file: Option<&PathBuf>,
    stdin: &mut impl Read,
) -> Result<String, AppError> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return Ok(fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    Ok(buf)
}

pub fn write_card(out: &mut impl Write, card: &ResultCard, format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Text => write!(out, "{}", render_text(card))?,
        OutputFormat::Json => {
            let json = render_json(card).map_err(|e| AppError::Validation(e.to_string()))?;
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}

/// Runs a single submit. Returns `true` when a result was rendered.
pub async fn run_analyze<C: DignityClassifier>(
    controller: &AnalysisController<C>,
    text: String,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<bool, AppError> {
    controller.set_input(text);
    match controller.submit().await {
        SubmitOutcome::Analyzed(result) => {
            write_card(out, &ResultCard::from_result(&result), format)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Line-oriented session: every line is one submit.
pub async fn run_interactive<C, R>(
    controller: &AnalysisController<C>,
    reader: R,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), AppError>
where
    C: DignityClassifier,
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    info!("Interactive session started");

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            ":quit" | ":q" => break,
            ":last" => match controller.current_result() {
                Some(result) => write_card(out, &ResultCard::from_result(&result), format)?,
                None => writeln!(out, "No analysis yet.")?,
            },
            _ => {
                if controller.is_busy() {
                    continue;
                }
                controller.set_input(line.as_str());
                writeln!(out, "Analyzing...")?;
                if let SubmitOutcome::Analyzed(result) = controller.submit().await {
                    write_card(out, &ResultCard::from_result(&result), format)?;
                }
            }
        }
    }

    info!("Interactive session ended");
    Ok(())
}
