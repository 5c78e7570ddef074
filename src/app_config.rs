use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings. The translator API key is
/// the single secret and is taken from the environment, never written back
/// to the config file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Profile name used as the opaque user id for the local store
    #[serde(default = "default_user")]
    pub user: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Dictionary lookup config
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Database file path override; None selects the per-user data directory
    #[serde(default)]
    pub database_path: Option<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Model name (e.g., "gemini-pro")
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Service endpoint URL; empty selects the public Gemini API
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// API key fallback for test setups; the GEMINI_API_KEY environment
    /// variable always wins
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl TranslationConfig {
    /// Resolve the API key: environment first, config fallback
    pub fn resolved_api_key(&self) -> String {
        std::env::var("GEMINI_API_KEY").unwrap_or_else(|_| self.api_key.clone())
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            endpoint: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
        }
    }
}

/// Dictionary lookup configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DictionaryConfig {
    /// Entry lookup endpoint; the word is appended as a path segment
    #[serde(default = "default_dictionary_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_dictionary_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity written to the config file in lowercase
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: default_user(),
            translation: TranslationConfig::default(),
            dictionary: DictionaryConfig::default(),
            database_path: None,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a file, creating a default one when missing
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            let config = Config::default();
            config.save(path)?;
            log::info!("Created default configuration at {}", path.display());
            Ok(config)
        }
    }

    /// Check that the configured endpoints are well-formed URLs
    pub fn validate(&self) -> Result<()> {
        if !self.translation.endpoint.is_empty() {
            url::Url::parse(&self.translation.endpoint).with_context(|| {
                format!(
                    "Invalid translation endpoint: {}",
                    self.translation.endpoint
                )
            })?;
        }
        url::Url::parse(&self.dictionary.endpoint)
            .with_context(|| format!("Invalid dictionary endpoint: {}", self.dictionary.endpoint))?;
        Ok(())
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

fn default_user() -> String {
    "local".to_string()
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

fn default_dictionary_endpoint() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_temperature() -> f32 {
    0.3
}
