//! Vesper - Entry Point
//!
//! Line-oriented REPL around the assistant core: read one utterance,
//! classify and dispatch it, print the per-command report. Speech capture,
//! TTS, and the GUI live in their own processes and talk to this core
//! through the library API.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vesper::assistant::{Assistant, TurnReport};
use vesper::command::CommandStatus;
use vesper::core::config::AssistantConfig;
use vesper::core::error::{Result, VesperError};

#[derive(Parser, Debug)]
#[command(name = "vesper")]
#[command(about = "Voice/text personal assistant command router")]
struct Args {
    /// Load configuration from a TOML file instead of the environment
    #[arg(long)]
    config: Option<PathBuf>,

    /// Handle a single utterance and exit
    #[arg(long)]
    once: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vesper=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AssistantConfig::from_file(path)?,
        None => AssistantConfig::from_env(),
    };
    config.validate().map_err(VesperError::Config)?;

    tracing::info!(assistant = %config.assistant_name, "starting");
    let mut assistant = Assistant::new(&config);

    if let Some(utterance) = &args.once {
        let report = assistant.handle_utterance(utterance).await;
        print_report(&report);
        return Ok(());
    }

    println!("{} is listening. Say 'bye' to leave.", config.assistant_name);
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let report = assistant.handle_utterance(input).await;
        print_report(&report);

        if report.exit {
            println!("Goodbye, {}.", config.user_name);
            break;
        }
    }

    Ok(())
}

fn print_report(report: &TurnReport) {
    for reply in &report.replies {
        println!("{reply}");
    }

    let Some(dispatch) = &report.dispatch else {
        return;
    };

    for result in &dispatch.results {
        let marker = match result.status {
            CommandStatus::Success => "ok",
            CommandStatus::Warning => "warning",
            CommandStatus::Failure => "FAILED",
        };
        match &result.detail {
            Some(detail) => println!("[{marker}] {} - {detail}", result.description),
            None => println!("[{marker}] {}", result.description),
        }
    }
    for skipped in &dispatch.skipped {
        println!("[skipped] {} ({:?})", skipped.input, skipped.reason);
    }
    if dispatch.results.is_empty() && dispatch.skipped.is_empty() {
        println!("Nothing to do.");
    }
}
