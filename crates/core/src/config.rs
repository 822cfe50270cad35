//! Configuration management for the ComplyBot service.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (comply.yaml)
//!
//! Precedence is CLI flags > environment variables > config file > defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// service behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bind address for the HTTP server
    pub host: String,

    /// Bind port for the HTTP server
    pub port: u16,

    /// Path to the compliance dataset JSON file
    pub data_path: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Explicit API key override (normally resolved via `llm.api_key_env`)
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Completion gateway configuration
    pub llm: LlmConfig,
}

/// Completion gateway configuration.
///
/// An explicit value object: model name, token limits, and temperature are
/// configuration, not hidden client state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider identifier ("openai" or "custom")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Environment variable holding the API key
    #[serde(rename = "apiKeyEnv", default = "default_api_key_env")]
    pub api_key_env: String,

    /// Optional custom endpoint URL (required for the "custom" provider)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate per completion
    #[serde(rename = "maxTokens", default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature (low for consistent, factual answers)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Outbound request timeout in seconds
    #[serde(rename = "timeoutSecs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_temperature() -> f32 {
    0.1
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key_env: default_api_key_env(),
            endpoint: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    server: Option<ServerConfig>,
    dataset: Option<DatasetConfig>,
    llm: Option<LlmConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DatasetConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            data_path: PathBuf::from("data/compliance.json"),
            config_file: None,
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
            llm: LlmConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `COMPLY_HOST`: Bind address
    /// - `COMPLY_PORT`: Bind port
    /// - `COMPLY_DATA`: Path to the compliance dataset
    /// - `COMPLY_CONFIG`: Path to config file
    /// - `COMPLY_PROVIDER`: Gateway provider
    /// - `COMPLY_MODEL`: Model identifier
    /// - `COMPLY_API_KEY`: Explicit API key override
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("COMPLY_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if it exists
        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("comply.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(host) = std::env::var("COMPLY_HOST") {
            config.host = host;
        }

        if let Ok(port) = std::env::var("COMPLY_PORT") {
            config.port = port
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid COMPLY_PORT value: {}", port)))?;
        }

        if let Ok(data_path) = std::env::var("COMPLY_DATA") {
            config.data_path = PathBuf::from(data_path);
        }

        if let Ok(provider) = std::env::var("COMPLY_PROVIDER") {
            config.llm.provider = provider;
        }

        if let Ok(model) = std::env::var("COMPLY_MODEL") {
            config.llm.model = model;
        }

        config.api_key = std::env::var("COMPLY_API_KEY").ok();
        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        // Merge server settings
        if let Some(server) = config_file.server {
            if let Some(host) = server.host {
                result.host = host;
            }
            if let Some(port) = server.port {
                result.port = port;
            }
        }

        // Merge dataset settings
        if let Some(dataset) = config_file.dataset {
            if let Some(path) = dataset.path {
                result.data_path = PathBuf::from(path);
            }
        }

        // Merge logging settings
        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        // Merge gateway settings
        if let Some(llm) = config_file.llm {
            result.llm = llm;
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        port: Option<u16>,
        data_path: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(port) = port {
            self.port = port;
        }

        if let Some(data_path) = data_path {
            self.data_path = data_path;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.llm.provider = provider;
        }

        if let Some(model) = model {
            self.llm.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolve the gateway API key.
    ///
    /// An explicit `COMPLY_API_KEY` wins; otherwise the environment variable
    /// named by `llm.api_key_env` is consulted.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        std::env::var(&self.llm.api_key_env).ok()
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let provider = &self.llm.provider;
        let known_providers = ["openai", "custom"];

        if !known_providers.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                provider,
                known_providers.join(", ")
            )));
        }

        if provider == "custom" && self.llm.endpoint.is_none() {
            return Err(AppError::Config(
                "The custom provider requires llm.endpoint to be set".to_string(),
            ));
        }

        // Custom endpoints may run unauthenticated; OpenAI never does
        if provider == "openai" && self.resolve_api_key().is_none() {
            return Err(AppError::Config(format!(
                "API key not found in environment variable: {}",
                self.llm.api_key_env
            )));
        }

        Ok(())
    }
}
