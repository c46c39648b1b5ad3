// Configuration loading for the todostore shell

use crate::filter::StatusFilter;
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

const DEFAULT_PROMPT: &str = "todo> ";

/// Raw contents of the YAML config file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub default_filter: Option<StatusFilter>,
    pub color: Option<bool>,
    pub log_level: Option<String>,
    pub prompt: Option<String>,
}

/// Values given on the command line; these win over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub no_color: bool,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub default_filter: StatusFilter,
    pub color: bool,
    pub log_level: Level,
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_filter: StatusFilter::All,
            color: true,
            log_level: Level::WARN,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl Config {
    /// Load the config file and apply command-line overrides
    ///
    /// An explicit `--config` path must exist. The default location is
    /// optional and silently skipped when absent.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        Self::load_with_default(overrides, default_path())
    }

    fn load_with_default(overrides: &ConfigOverrides, default: Option<PathBuf>) -> Result<Self> {
        let file = match &overrides.config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(eyre!("Config file not found: {}", path.display()));
                }
                read_config(path)?
            }
            None => match default {
                Some(path) if path.exists() => read_config(&path)?,
                _ => ConfigFile::default(),
            },
        };

        merge(file, overrides)
    }
}

/// `$XDG_CONFIG_HOME/todostore/config.yaml` or the platform equivalent
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("todostore").join("config.yaml"))
}

fn read_config(path: &Path) -> Result<ConfigFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    let config: ConfigFile = serde_yaml::from_str(content).context("Failed to parse config YAML")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(level) = &config.log_level {
        parse_level(level)?;
    }
    Ok(())
}

fn parse_level(level: &str) -> Result<Level> {
    level.parse::<Level>().map_err(|_| {
        eyre!(
            "Invalid log level: {} (expected error, warn, info, debug or trace)",
            level
        )
    })
}

fn merge(file: ConfigFile, overrides: &ConfigOverrides) -> Result<Config> {
    let defaults = Config::default();

    let log_level = match overrides.log_level.as_deref().or(file.log_level.as_deref()) {
        Some(level) => parse_level(level)?,
        None => defaults.log_level,
    };

    Ok(Config {
        default_filter: file.default_filter.unwrap_or(defaults.default_filter),
        color: !overrides.no_color && file.color.unwrap_or(defaults.color),
        log_level,
        prompt: file.prompt.unwrap_or(defaults.prompt),
    })
}
