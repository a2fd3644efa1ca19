use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use daytrip_agent::{build_planner, LineConsole, LlmGenerator};
use daytrip_core::config::AppConfig;
use daytrip_core::traits::Console;
use daytrip_core::PlannerState;

const DEFAULT_CONFIG: &str = "daytrip.toml";

#[derive(Parser)]
#[command(name = "daytrip", version, about = "Plan a day trip with a language model")]
struct Cli {
    /// Path to config file [default: daytrip.toml, optional]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// LLM provider (groq, openai, ollama, ...)
    #[arg(long, env = "DAYTRIP_PROVIDER")]
    provider: Option<String>,

    /// Model ID
    #[arg(long, env = "DAYTRIP_MODEL")]
    model: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask for a city and interests, then print an itinerary
    Plan {
        /// Print the final state as JSON instead of the itinerary text
        #[arg(long)]
        json: bool,
    },
    /// Show effective configuration
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();

    let default_filter = if cli.verbose {
        "daytrip=debug,daytrip_agent=debug,daytrip_llm=debug,warn"
    } else {
        "daytrip=info,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Completions never touch the config file
    match cli.command.take().unwrap_or(Commands::Plan { json: false }) {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "daytrip", &mut std::io::stdout());
        }
        Commands::Config => {
            let config = load_config(&cli)?;
            print!("{}", toml::to_string_pretty(&config.redacted())?);
        }
        Commands::Plan { json } => {
            let config = load_config(&cli)?;
            plan(&config, json).await?;
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::load_or_default(Path::new(DEFAULT_CONFIG))
            .with_context(|| format!("loading config from {}", DEFAULT_CONFIG))?,
    };

    if let Some(provider) = &cli.provider {
        config.model.provider = provider.clone();
    }
    if let Some(model) = &cli.model {
        config.model.model_id = model.clone();
    }
    Ok(config)
}

async fn plan(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    // Resolve the credential up front so a missing key fails before any prompt
    let generator = LlmGenerator::from_config(&config.model)?;
    info!(
        provider = %config.model.provider,
        model = %config.model.model_id,
        "Using model"
    );

    let console = Arc::new(LineConsole::stdio());
    let workflow = build_planner(console.clone(), Arc::new(generator))?;

    let result = workflow
        .execute(PlannerState::new(config.planner.opening_message.clone()))
        .await?;

    if json {
        console
            .print_line(&serde_json::to_string_pretty(&result.state)?)
            .await?;
    } else {
        console.print_line("\nFinal Itinerary:").await?;
        console.print_line(result.state.itinerary()).await?;
    }
    Ok(())
}
