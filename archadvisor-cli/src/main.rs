//! ArchAdvisor CLI - chat with the architecture advisor from the terminal.

mod terminal;

use std::time::Duration;

use anyhow::Context;
use archadvisor::{AdvisorConfig, ProviderRouter, Session, SilentRenderer};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use terminal::TerminalRenderer;

#[derive(Parser)]
#[command(name = "archadvisor")]
#[command(about = "AI system architecture advisor with rule-based fallback", long_about = None)]
#[command(version)]
struct Cli {
    /// Delay between rendered words in milliseconds (overrides ARCHADVISOR_PACE_MS)
    #[arg(long, global = true, value_name = "MS")]
    pace_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat session (default)
    Chat,

    /// Ask a single question and exit
    Ask {
        /// Free-text system description
        #[arg(value_name = "TEXT")]
        text: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Print the answer at once instead of word by word
        #[arg(long)]
        no_stream: bool,
    },

    /// Show the detected architecture category for a description
    Classify {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// List providers in priority order with credential status
    Providers,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Markdown streamed to the terminal
    Human,
    /// JSON transcript
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AdvisorConfig::from_env().context("invalid environment configuration")?;
    if let Some(ms) = cli.pace_ms {
        config.render_pace = Duration::from_millis(ms);
    }

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => handle_chat(&config).await,
        Commands::Ask {
            text,
            format,
            no_stream,
        } => handle_ask(&config, &text, format, no_stream).await,
        Commands::Classify { text } => {
            handle_classify(&text);
            Ok(())
        }
        Commands::Providers => {
            handle_providers(&config);
            Ok(())
        }
    }
}

async fn handle_chat(config: &AdvisorConfig) -> anyhow::Result<()> {
    let router = ProviderRouter::from_config(config);
    let mut session = Session::new();
    let mut renderer = TerminalRenderer::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("🤖 AI System Architect Advisor");
    println!("Multi-Model • Fail-Safe • /history /reset /quit\n");

    loop {
        terminal::prompt("Describe your system requirements...")?;
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };
        // trimmed only to recognise commands; the turn keeps the raw line
        let raw = line.trim_end_matches(['\r', '\n']);

        match raw.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/history" => {
                if session.turns().is_empty() {
                    println!("(no turns yet)\n");
                } else {
                    println!("{}\n", session.to_markdown());
                }
            }
            "/reset" => {
                session = Session::new();
                println!("Started a new session.\n");
            }
            _ => {
                session
                    .submit(raw, &router, &mut renderer, config.render_pace)
                    .await
                    .context("failed to render response")?;
            }
        }
    }

    tracing::debug!(session = %session.id, turns = session.turns().len(), "Chat ended");
    Ok(())
}

async fn handle_ask(
    config: &AdvisorConfig,
    text: &str,
    format: OutputFormat,
    no_stream: bool,
) -> anyhow::Result<()> {
    let router = ProviderRouter::from_config(config);
    let mut session = Session::new();
    let pace = if no_stream {
        Duration::ZERO
    } else {
        config.render_pace
    };

    match format {
        OutputFormat::Human => {
            let mut renderer = TerminalRenderer::stdout();
            session.submit(text, &router, &mut renderer, pace).await?;
        }
        OutputFormat::Json => {
            session
                .submit(text, &router, &mut SilentRenderer, Duration::ZERO)
                .await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
    }
    Ok(())
}

fn handle_classify(text: &str) {
    let category = archadvisor::classify(text);
    println!("{}", category.label());
}

fn handle_providers(config: &AdvisorConfig) {
    let router = ProviderRouter::from_config(config);
    println!("Providers in priority order:\n");

    for (rank, status) in router.status().iter().enumerate() {
        let credential = if status.configured { "set" } else { "missing" };
        let call_path = if status.wired { "wired" } else { "no call path" };
        println!("  {}. {}", rank + 1, status.label);
        println!("     {}: {}", status.env_var, credential);
        println!("     {}", call_path);
        if let Some(ref model) = status.model {
            println!("     model: {} ({})", model.model_name, model.endpoint);
        }
        println!();
    }

    let candidates = router.candidates();
    if candidates.is_empty() {
        println!("No credentials configured: every answer will use Auto-Fallback.");
    }
}
