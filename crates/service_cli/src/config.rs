//! Sampler configuration management
//!
//! Handles loading configuration from a TOML file, `RLA_*` environment
//! variables and CLI arguments.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sampler_core::Resolver;
use serde::Deserialize;
use thiserror::Error;
use tracing::Level;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid order: {0}. Must be one of: selection, location")]
    InvalidOrder(String),

    #[error("Invalid resolver: {0}. Must be one of: linear, indexed")]
    InvalidResolver(String),

    #[error("Invalid output format: {0}. Must be one of: text, json, csv")]
    InvalidFormat(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log level, named as `tracing` names its levels (case-insensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub Level);

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(Level::INFO)
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Level>()
            .map(LogLevel)
            .map_err(|_| ConfigError::InvalidLogLevel(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl LogLevel {
    /// Default `EnvFilter` directive for this level
    pub fn directive(&self) -> String {
        self.0.as_str().to_ascii_lowercase()
    }
}

/// Order in which selected ballots are listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Draw order, as announced at the ceremony
    #[default]
    Selection,
    /// Natural order of identifiers, for pulling ballots from storage
    Location,
}

impl FromStr for SortOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "selection" => Ok(SortOrder::Selection),
            "location" => Ok(SortOrder::Location),
            _ => Err(ConfigError::InvalidOrder(s.to_string())),
        }
    }
}

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One identifier per line
    #[default]
    Text,
    /// JSON array of ballot records
    Json,
    /// CSV with draw, position, ballot and location columns
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

/// Parse a resolver name
pub fn parse_resolver(s: &str) -> Result<Resolver, ConfigError> {
    match s.to_lowercase().as_str() {
        "linear" => Ok(Resolver::Linear),
        "indexed" => Ok(Resolver::Indexed),
        _ => Err(ConfigError::InvalidResolver(s.to_string())),
    }
}

/// Sampler configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Public random seed
    pub seed: Option<String>,
    /// Number of ballots to draw
    pub sample_size: Option<usize>,
    /// Manifest CSV path
    pub manifest: Option<PathBuf>,
    /// Declared population size, checked against the manifest
    pub population: Option<u64>,
    /// Whether the same position may be drawn twice
    pub with_replacement: bool,
    /// Leading draws to discard
    pub skip: usize,
    /// Listing order
    pub order: SortOrder,
    /// Position lookup strategy
    pub resolver: Resolver,
    /// Output rendering
    pub format: OutputFormat,
    /// Log level
    pub log_level: LogLevel,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            sample_size: None,
            manifest: None,
            population: None,
            with_replacement: true,
            skip: 0,
            order: SortOrder::Selection,
            resolver: Resolver::Indexed,
            format: OutputFormat::Text,
            log_level: LogLevel::default(),
        }
    }
}

/// Environment variables read by [`SamplerConfig::apply_env`]
pub const ENV_VARS: [&str; 6] = [
    "RLA_SEED",
    "RLA_SAMPLE_SIZE",
    "RLA_MANIFEST",
    "RLA_POPULATION",
    "RLA_WITH_REPLACEMENT",
    "RLA_LOG_LEVEL",
];

impl SamplerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from `RLA_*` variables found by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("RLA_SEED") {
            self.seed = Some(seed);
        }
        if let Some(n) = lookup("RLA_SAMPLE_SIZE") {
            self.sample_size = Some(parse_number("RLA_SAMPLE_SIZE", &n)?);
        }
        if let Some(path) = lookup("RLA_MANIFEST") {
            self.manifest = Some(PathBuf::from(path));
        }
        if let Some(n) = lookup("RLA_POPULATION") {
            self.population = Some(parse_number("RLA_POPULATION", &n)?);
        }
        if let Some(flag) = lookup("RLA_WITH_REPLACEMENT") {
            self.with_replacement = parse_bool("RLA_WITH_REPLACEMENT", &flag)?;
        }
        if let Some(level) = lookup("RLA_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(seed) = &cli.seed {
            self.seed = Some(seed.clone());
        }
        if let Some(n) = cli.sample_size {
            self.sample_size = Some(n);
        }
        if let Some(path) = &cli.manifest {
            self.manifest = Some(path.clone());
        }
        if let Some(n) = cli.population {
            self.population = Some(n);
        }
        if cli.without_replacement {
            self.with_replacement = false;
        }
        if let Some(skip) = cli.skip {
            self.skip = skip;
        }
        if let Some(order) = &cli.order {
            self.order = SortOrder::from_str(order)?;
        }
        if let Some(resolver) = &cli.resolver {
            self.resolver = parse_resolver(resolver)?;
        }
        if let Some(format) = &cli.format {
            self.format = OutputFormat::from_str(format)?;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        Ok(())
    }

    /// Seed, or an error naming the setting
    pub fn require_seed(&self) -> Result<&str, ConfigError> {
        match self.seed.as_deref() {
            Some(seed) if !seed.is_empty() => Ok(seed),
            _ => Err(ConfigError::Missing("seed (--seed or RLA_SEED)")),
        }
    }

    /// Sample size, or an error naming the setting
    pub fn require_sample_size(&self) -> Result<usize, ConfigError> {
        self.sample_size
            .ok_or(ConfigError::Missing("sample size (--sample-size or RLA_SAMPLE_SIZE)"))
    }

    /// Manifest path, or an error naming the setting
    pub fn require_manifest(&self) -> Result<&Path, ConfigError> {
        self.manifest
            .as_deref()
            .ok_or(ConfigError::Missing("manifest (--manifest or RLA_MANIFEST)"))
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    pub seed: Option<String>,
    pub sample_size: Option<usize>,
    pub manifest: Option<PathBuf>,
    pub population: Option<u64>,
    pub without_replacement: bool,
    pub skip: Option<usize>,
    pub order: Option<String>,
    pub resolver: Option<String>,
    pub format: Option<String>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<SamplerConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<SamplerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => SamplerConfig::from_file(path)?,
        None => SamplerConfig::default(),
    };
    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;
    Ok(config)
}
