//! gazeproj - inspect eye-tracking projects from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gazeproj_cli::commands::{self, OutputFormat};
use gazeproj_cli::logging::{self, LogConfig, LogFormat, LogPreset};
use gazeproj_core::ProjectConfig;
use std::path::PathBuf;

/// gazeproj - eye-tracking project inspector.
#[derive(Parser, Debug)]
#[command(name = "gazeproj")]
#[command(about = "Inspect eye-tracking project directories and their session descriptors")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (INFO level for every component)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging (DEBUG level)
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable trace logging (TRACE level, includes decoded descriptor bodies)
    #[arg(long, global = true)]
    trace: bool,

    /// Quiet mode (WARN and ERROR only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log level for specific targets (e.g., "descriptor=trace" or "scan=debug")
    /// Can be specified multiple times. Targets are prefixed with "gazeproj::" automatically.
    #[arg(long = "log", value_name = "TARGET=LEVEL", global = true)]
    log_overrides: Vec<String>,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the sessions info table
    Info {
        /// Project root directory
        dir: PathBuf,

        /// Table format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Dump the raw descriptor entries as JSON
    Entries {
        /// Project root directory
        dir: PathBuf,
    },
    /// Show the project directory layout
    Scan {
        /// Project root directory
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let preset = LogPreset::from_flags(cli.verbose, cli.debug, cli.trace, cli.quiet);
    let log_config = LogConfig::new(preset, &cli.log_overrides, cli.log_format);
    logging::init(&log_config);

    let config = match &cli.config {
        Some(path) => ProjectConfig::load_from(path)?,
        None => ProjectConfig::load()?,
    };

    tracing::info!(
        target: "gazeproj::startup",
        "Loaded configuration (descriptor extension: .{})",
        config.descriptor_extension
    );

    let output = match &cli.command {
        Command::Info { dir, format } => commands::info(dir, &config, *format)?,
        Command::Entries { dir } => commands::entries(dir, &config)?,
        Command::Scan { dir } => commands::layout(dir, &config)?,
    };
    print!("{}", output);

    Ok(())
}
