//! Tracing subscriber setup for the `gazeproj` binary.
//!
//! The filter comes from `RUST_LOG` when set; otherwise from a preset picked by
//! the verbosity flags plus any `--log TARGET=LEVEL` overrides. Logs are
//! written to stderr so stdout carries only command output.

use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const TARGET_PREFIX: &str = "gazeproj";

/// Log line encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Base verbosity, selected by the `-q`/`-v`/`-d`/`--trace` flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogPreset {
    /// Project loads and batch progress; other components only warn
    #[default]
    Production,
    Verbose,
    Debug,
    /// Includes decoded descriptor bodies
    Trace,
    Quiet,
}

impl LogPreset {
    /// The quietest flag wins.
    pub fn from_flags(verbose: bool, debug: bool, trace: bool, quiet: bool) -> Self {
        match (quiet, trace, debug, verbose) {
            (true, ..) => LogPreset::Quiet,
            (_, true, ..) => LogPreset::Trace,
            (_, _, true, _) => LogPreset::Debug,
            (_, _, _, true) => LogPreset::Verbose,
            _ => LogPreset::Production,
        }
    }

    fn directives(self) -> &'static [&'static str] {
        match self {
            LogPreset::Production => &[
                "gazeproj=warn",
                "gazeproj::startup=info",
                "gazeproj::project=info",
                "gazeproj::batch=info",
            ],
            LogPreset::Verbose => &["gazeproj=info"],
            LogPreset::Debug => &["gazeproj=debug"],
            LogPreset::Trace => &["gazeproj=trace"],
            LogPreset::Quiet => &["gazeproj=warn"],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub preset: LogPreset,
    /// Full target name to level, applied after the preset.
    pub overrides: BTreeMap<String, Level>,
    pub format: LogFormat,
}

impl LogConfig {
    /// Overrides are `target=level` pairs, comma-separated or repeated.
    /// Short targets get the `gazeproj::` prefix; malformed pairs are skipped.
    pub fn new(preset: LogPreset, overrides: &[String], format: LogFormat) -> Self {
        let overrides = overrides
            .iter()
            .flat_map(|arg| arg.split(','))
            .filter_map(parse_override)
            .collect();

        Self {
            preset,
            overrides,
            format,
        }
    }

    /// Directive string handed to [`EnvFilter`].
    pub fn directives(&self) -> String {
        self.preset
            .directives()
            .iter()
            .map(|d| d.to_string())
            .chain(
                self.overrides
                    .iter()
                    .map(|(target, level)| format!("{}={}", target, level.as_str().to_lowercase())),
            )
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn build_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(self.directives()))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn parse_override(pair: &str) -> Option<(String, Level)> {
    let (target, level) = pair.split_once('=')?;
    let target = target.trim();
    let level = Level::from_str(level.trim()).ok()?;

    let target = if target == TARGET_PREFIX || target.starts_with("gazeproj::") {
        target.to_string()
    } else {
        format!("{}::{}", TARGET_PREFIX, target)
    };
    Some((target, level))
}

/// Install the global subscriber.
pub fn init(config: &LogConfig) {
    let (text, json) = match config.format {
        LogFormat::Text => (
            Some(fmt::layer().with_writer(std::io::stderr).with_target(true)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_writer(std::io::stderr).with_target(true)),
        ),
    };

    tracing_subscriber::registry()
        .with(config.build_filter())
        .with(text)
        .with(json)
        .init();
}
