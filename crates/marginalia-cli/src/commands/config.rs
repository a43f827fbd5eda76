//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use marginalia_core::Config;

use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;

/// Dispatch a config subcommand (defaults to `show`)
pub fn handle(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => set(key, value, config_path, output),
    }
}

/// Show current configuration
fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config = load(config_path)?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "catalog_path": config.catalog_path
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:     {}", config.data_dir.display());
            println!(
                "  catalog_path: {}",
                config
                    .catalog_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
fn set(key: String, value: String, config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let mut config = load(config_path)?;

    match key.as_str() {
        "data_dir" => {
            config.data_dir = value.clone().into();
        }
        "catalog_path" => {
            config.catalog_path = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.clone().into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, catalog_path",
                key
            );
        }
    }

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn load(config_path: Option<&PathBuf>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path).context("Failed to load configuration"),
        None => Config::load().context("Failed to load configuration"),
    }
}
