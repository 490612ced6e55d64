//! Config command - inspect the active extraction vocabulary.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use tradeconf_core::{FieldName, TradeConfConfig};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the active configuration as JSON
    Show,

    /// Show where the configuration is read from
    Path,

    /// List broker aliases in match order
    Brokers,

    /// List field labels in priority order
    Labels {
        /// Only this field (e.g. "amount", "trade_date")
        field: Option<String>,
    },
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(config_path),
        ConfigCommand::Path => show_path(config_path),
        ConfigCommand::Brokers => list_brokers(&load_config(config_path)?),
        ConfigCommand::Labels { field } => list_labels(&load_config(config_path)?, field.as_deref()),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tradeconf")
        .join("config.json")
}

/// File the configuration comes from, if any.
fn active_path(config_path: Option<&str>) -> Option<PathBuf> {
    match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => Some(default_config_path()).filter(|p| p.exists()),
    }
}

/// Load the config from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TradeConfConfig> {
    match active_path(config_path) {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            TradeConfConfig::from_file(&path)
                .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
        }
        None => Ok(TradeConfConfig::default()),
    }
}

fn show_config(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if active_path(config_path).is_none() {
        eprintln!("{} No config file found, showing defaults.", style("ℹ").blue());
    }
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn show_path(config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    println!("Configuration file: {}", path.display());
    if path.exists() {
        println!("Status: {}", style("in use").green());
    } else {
        println!("Status: {}", style("not found, using defaults").yellow());
    }

    Ok(())
}

fn list_brokers(config: &TradeConfConfig) -> anyhow::Result<()> {
    for (rank, alias) in config.extraction.brokers.iter().enumerate() {
        println!("{:>3}. {:<24} {}", rank + 1, alias.name, style(&alias.code).cyan());
    }
    println!(
        "Last {} lines are re-scanned for broker names.",
        config.extraction.broker_tail_lines
    );

    Ok(())
}

fn list_labels(config: &TradeConfConfig, field: Option<&str>) -> anyhow::Result<()> {
    let extraction = &config.extraction;

    match field {
        Some(field) => {
            let name: FieldName = field.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let Some(labels) = extraction.labels_for(name) else {
                anyhow::bail!("{} is not found by label", name);
            };
            for label in labels {
                println!("{}", label);
            }
        }
        None => {
            for name in FieldName::ALL {
                if let Some(labels) = extraction.labels_for(name) {
                    println!("{}: {}", style(name).bold(), labels.join(", "));
                }
            }
        }
    }

    Ok(())
}
