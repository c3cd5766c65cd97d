//! Subcommand implementations and the helpers they share.

pub mod compare;
pub mod config;
pub mod extract;
pub mod find;

use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use glob::glob;
use tracing::debug;

use invmatch_core::models::config::InvmatchConfig;

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text lines
    Text,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invmatch")
        .join("config.json")
}

/// Load the config named on the command line, else the default file if it exists.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvmatchConfig> {
    if let Some(path) = config_path {
        return Ok(InvmatchConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        Ok(InvmatchConfig::from_file(&default_path)?)
    } else {
        Ok(InvmatchConfig::default())
    }
}

/// Expand glob patterns; plain paths are kept even if they do not exist.
pub fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if is_glob(input) {
            let matched: Vec<PathBuf> = glob(input)?.filter_map(|r| r.ok()).collect();
            if matched.is_empty() {
                eprintln!(
                    "{} No files match {}",
                    style("!").yellow(),
                    input
                );
            }
            files.extend(matched);
        } else {
            files.push(PathBuf::from(input));
        }
    }

    Ok(files)
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Write `output` to `path`, or to stdout when no path is given.
pub fn emit(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(output_path) = path {
        fs::write(output_path, output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }
    Ok(())
}
