//! Application configuration

use directories::ProjectDirs;
use sanitize_core::{Mode, Sanitizer, DEFAULT_MAX_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cli::Cli;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sanitize: SanitizeConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeConfig {
    pub replacement: String,
    pub max_length: usize,
    pub mode: Mode,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            replacement: String::new(),
            max_length: DEFAULT_MAX_LENGTH,
            mode: Mode::Clean,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub changed_only: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[serde(rename = "plain")]
    #[default]
    Plain,
    #[serde(rename = "json")]
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format '{}', expected 'plain' or 'json'", other)),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from the default location
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else if path.is_some() {
            anyhow::bail!("Configuration file not found: {}", config_path.display())
        } else {
            tracing::debug!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "takawasi", "sanitize")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }

    /// Apply command-line overrides
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(mode) = cli.mode {
            self.sanitize.mode = mode;
        }
        if let Some(replacement) = &cli.replacement {
            self.sanitize.replacement = replacement.clone();
        }
        if let Some(max_length) = cli.max_length {
            self.sanitize.max_length = max_length;
        }
        if let Some(format) = cli.format {
            self.output.format = format;
        }
        if cli.changed_only {
            self.output.changed_only = true;
        }
    }

    /// Build the sanitizer, falling back to defaults on invalid options
    pub fn sanitizer(&self) -> Sanitizer {
        let (sanitizer, err) = Sanitizer::with_options_or_default(
            &self.sanitize.replacement,
            self.sanitize.max_length,
        );
        if let Some(e) = err {
            tracing::warn!("Invalid sanitize options ({}), using defaults", e);
        }
        sanitizer
    }
}
