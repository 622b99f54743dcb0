//! Read-only inspection commands. Each renders to a string for stdout.

use crate::metadata::MetadataSession;
use anyhow::{Context, Result};
use gazeproj_core::{scan, DescriptorParser, Project, ProjectConfig, ProjectDir};
use std::fmt::Write as _;
use std::path::Path;

/// Output format for the sessions table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Sessions info table of the project at `path`.
pub fn info(path: &Path, config: &ProjectConfig, format: OutputFormat) -> Result<String> {
    let project = Project::open_with(path, config, MetadataSession::factory())
        .with_context(|| format!("Failed to open project {}", path.display()))?;
    let table = project.get_sessions_info()?;

    match format {
        OutputFormat::Text => {
            let mut out = format!("{} ({} sessions)\n", project.name(), project.len());
            out.push_str(&table.to_text());
            Ok(out)
        }
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(&table.to_records())?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Raw descriptor entries as a JSON array, in descriptor order.
pub fn entries(path: &Path, config: &ProjectConfig) -> Result<String> {
    let parser = DescriptorParser::from_format(&config.descriptor)?;
    let root = scan(path, config)
        .with_context(|| format!("Failed to scan project {}", path.display()))?;
    let entries = parser
        .read(&root.descriptor_path)
        .with_context(|| format!("Failed to read {}", root.descriptor_path.display()))?;

    let mut out = serde_json::to_string_pretty(&entries)?;
    out.push('\n');
    Ok(out)
}

/// Directory layout of the project at `path`.
pub fn layout(path: &Path, config: &ProjectConfig) -> Result<String> {
    let root = scan(path, config)
        .with_context(|| format!("Failed to scan project {}", path.display()))?;

    let mut out = String::new();
    writeln!(out, "project     {}", root.name)?;
    writeln!(out, "path        {}", root.path.display())?;
    writeln!(out, "descriptor  {}", root.descriptor_path.display())?;
    for dir in [ProjectDir::User, ProjectDir::Src, ProjectDir::Result] {
        let shown = root
            .subdir(dir)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(out, "{:<12}{}", dir.name(), shown)?;
    }
    for shadowed in &root.shadowed_descriptors {
        writeln!(out, "shadowed    {}", shadowed.display())?;
    }
    Ok(out)
}
