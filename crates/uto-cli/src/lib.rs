//! Uto CLI
//!
//! Commands behind the `uto` binary. Each command reads and writes JSON files and returns the text
//! it would print, so it can be exercised without a process.

#![warn(unreachable_pub)]

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use uto_migrations::{MigrationConfig, MigrationReport, Migrator};
use uto_project::VersionedDocument;
use uto_templates::{current_time_ms, new_project_document, NoopParser};

/// Load a migration config from a TOML file, or the defaults when no file is given
///
/// # Errors
/// Returns error if the file cannot be read or is not a valid config
pub fn load_config(path: Option<&Path>) -> Result<MigrationConfig> {
    let Some(path) = path else {
        return Ok(MigrationConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    MigrationConfig::from_toml_str(&text)
        .with_context(|| format!("failed to load config {}", path.display()))
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn write_or_return(text: String, output: Option<&Path>) -> Result<String> {
    match output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote document");
            Ok(String::new())
        }
        None => Ok(text),
    }
}

/// Migrate the document at `input` to the current version
///
/// Returns the pretty-printed document when no `output` is given, and the run's report.
///
/// # Errors
/// Returns error if the input cannot be read or decoded, or migration fails
pub fn run_migrate(
    input: &Path,
    output: Option<&Path>,
    config: MigrationConfig,
) -> Result<(String, MigrationReport)> {
    let value = read_json(input)?;
    let (migrated, report) = Migrator::new(config)
        .run_json(value)
        .with_context(|| format!("failed to migrate {}", input.display()))?;
    for diagnostic in &report.diagnostics {
        tracing::warn!(
            from_version = diagnostic.from_version,
            kind = ?diagnostic.kind,
            path = diagnostic.path.as_deref().unwrap_or("-"),
            "{}",
            diagnostic.message
        );
    }
    let text = serde_json::to_string_pretty(&migrated)?;
    Ok((write_or_return(text, output)?, report))
}

/// Describe the document at `input`: its declared version and every path it holds
///
/// # Errors
/// Returns error if the input cannot be read or decoded
pub fn run_inspect(input: &Path) -> Result<String> {
    let document = VersionedDocument::from_json(read_json(input)?)
        .with_context(|| format!("failed to decode {}", input.display()))?;
    let mut lines = vec![format!("projectVersion: {}", document.version())];
    lines.extend(document.content_paths());
    Ok(lines.join("\n"))
}

/// Create a fresh current document
///
/// # Errors
/// Returns error if the document cannot be built or written
pub fn run_new_project(output: Option<&Path>) -> Result<String> {
    let document = new_project_document(&NoopParser, current_time_ms())
        .context("failed to build new project contents")?;
    let value = VersionedDocument::V6(document).to_json()?;
    write_or_return(serde_json::to_string_pretty(&value)?, output)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
