//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{print_formatted, print_success, OutputFormat};
use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "service.base_url", "interface.theme")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "service.base_url", "interface.theme")
        key: String,

        /// Value to set ("none" clears service.timeout_secs)
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format).await,
        ConfigCommands::Get { key } => get(&key, format).await,
        ConfigCommands::Set { key, value } => set(&key, &value, quiet).await,
        ConfigCommands::Path => path(format).await,
    }
}

async fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let toml = toml::to_string_pretty(&config)?;
            println!("{}", toml);
        }
    }

    Ok(())
}

async fn get(key: &str, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let value = get_config_value(&config, key)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&value)?);
        }
        OutputFormat::Text => {
            println!("{}", value);
        }
    }

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["service", "base_url"] => Ok(config.service.base_url.clone()),
        ["service", "timeout_secs"] => Ok(config
            .service
            .timeout_secs
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string())),
        ["interface", "theme"] => Ok(config.interface.theme.name().to_lowercase()),
        ["interface", "hero_interval_secs"] => Ok(config.interface.hero_interval_secs.to_string()),
        ["interface", "audio_on_start"] => Ok(config.interface.audio_on_start.to_string()),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

async fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;
    set_config_value(&mut config, key, value)?;
    config.save()?;

    print_success(&format!("Set {} = {}", key, value), quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["service", "base_url"] => {
            let url = value.trim().trim_end_matches('/');
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("Base URL must start with http:// or https://");
            }
            config.service.base_url = url.to_string();
        }
        ["service", "timeout_secs"] => {
            config.service.timeout_secs = match value {
                "none" | "" => None,
                secs => Some(secs.parse()?),
            };
        }
        ["interface", "theme"] => {
            config.interface.theme = value.parse()?;
        }
        ["interface", "hero_interval_secs"] => {
            let secs: u64 = value.parse()?;
            if secs == 0 {
                anyhow::bail!("hero_interval_secs must be at least 1");
            }
            config.interface.hero_interval_secs = secs;
        }
        ["interface", "audio_on_start"] => {
            config.interface.audio_on_start = value.parse()?;
        }
        _ => anyhow::bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

async fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    })?;

    Ok(())
}
