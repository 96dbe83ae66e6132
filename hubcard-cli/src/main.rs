//! hubcard CLI — generate and normalize model cards for training output directories.

mod commands;

use clap::Parser;
use hubcard_core::SettingsOverrides;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// hubcard: model cards for diffusion training runs
#[derive(Parser, Debug)]
#[command(name = "hubcard", version, about, long_about = None)]
struct Cli {
    /// Workspace directory (for `.hubcard/config.toml`)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Hub namespace that bare model names are published under
    #[arg(long)]
    namespace: Option<String>,

    /// Hub token passed to repository-name resolution (or `HUBCARD_HUB_TOKEN`)
    #[arg(long)]
    token: Option<String>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Commands {
    /// Render the card of a finished training run into its output directory
    Generate {
        /// Training configuration file (TOML)
        #[arg(short, long)]
        config: PathBuf,
        /// Name of the trained model
        #[arg(short, long)]
        model_name: String,
        /// Override the output directory from the training configuration
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Create or update the card of a directory, setting its library name
    Normalize {
        /// Output directory containing (or receiving) README.md
        dir: PathBuf,
    },
    /// Print the metadata of an existing card
    Show {
        /// Output directory containing README.md
        dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    let log_dir = directories::ProjectDirs::from("dev", "hubcard", "hubcard")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "hubcard.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let overrides = SettingsOverrides {
        namespace: cli.namespace,
        hub_token: cli.token,
        ..SettingsOverrides::default()
    };
    let settings = hubcard_core::load_settings(Some(&workspace), Some(&overrides))?;

    commands::run(cli.command, settings)
}
