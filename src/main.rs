use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod cli;
mod core;
mod daemon;
mod providers;
mod tracker;

use crate::core::settings::{LogFormat, Settings};

#[derive(Parser)]
#[command(name = "roo-tracker")]
#[command(author, version, about = "Adaptive poller for an in-flight Deliveroo HK order")]
struct Cli {
    /// Path to the config file (default: $XDG_CONFIG_HOME/roo-tracker/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the order API until interrupted
    Daemon {
        /// Print results as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Run a single poll and print the current order state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the configured token is accepted
    Validate,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(settings: &Settings) {
    let default_level = if settings.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = match settings.logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed(),
    };

    let journald_layer = if settings.logging.journald {
        match tracing_journald::layer() {
            Ok(layer) => Some(layer),
            Err(e) => {
                eprintln!("journald unavailable, logging to stderr only: {e}");
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(journald_layer)
        .init();
}

fn load_settings(path: Option<&std::path::Path>) -> anyhow::Result<Settings> {
    let settings = Settings::load(path)?;
    init_logging(&settings);
    tracing::debug!(
        path = ?path.map(PathBuf::from).or_else(Settings::config_path),
        "Loaded config"
    );
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Daemon { json } => {
            let settings = load_settings(config)?;
            daemon::run(settings, json).await
        }
        Commands::Status { json } => {
            let settings = load_settings(config)?;
            cli::status::run(settings, json).await
        }
        Commands::Validate => {
            let settings = load_settings(config)?;
            cli::validate::run(settings).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}
