//! Runtime settings.
//!
//! Resolution order: built-in defaults, then an optional TOML file, then
//! `SPACES_*` environment variables, then validation.

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of every environment override, e.g. `SPACES_CACHE_SIZE`.
pub const ENV_PREFIX: &str = "SPACES_";

const LOG_LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {key}")]
    InvalidOverride { key: String, value: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `"development"` or `"production"`.
    pub environment: String,
    pub log_level: String,
    /// Maximum number of cached results.
    pub cache_size: usize,
    /// Seconds a cached result stays valid.
    pub cache_ttl: u64,
    pub host: String,
    pub port: u16,
    /// Comma-separated list of origins.
    pub allowed_origins: String,
    /// Requests per minute.
    pub rate_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "INFO".to_string(),
            cache_size: 100,
            cache_ttl: 3600,
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: "http://localhost:5173,http://localhost:3000".to_string(),
            rate_limit: 60,
        }
    }
}

impl Settings {
    /// Defaults, then `path` if given, then the environment.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut settings = match path {
            Some(path) => Self::from_toml(&fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        settings.apply_env_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Applies `SPACES_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            let key = format!("{ENV_PREFIX}{name}");
            lookup(&key).map(|value| (key, value))
        };

        if let Some((_, v)) = var("ENVIRONMENT") {
            self.environment = v;
        }
        if let Some((_, v)) = var("LOG_LEVEL") {
            self.log_level = v;
        }
        if let Some((_, v)) = var("HOST") {
            self.host = v;
        }
        if let Some((_, v)) = var("ALLOWED_ORIGINS") {
            self.allowed_origins = v;
        }
        if let Some((k, v)) = var("CACHE_SIZE") {
            self.cache_size = parse_override(k, v)?;
        }
        if let Some((k, v)) = var("CACHE_TTL") {
            self.cache_ttl = parse_override(k, v)?;
        }
        if let Some((k, v)) = var("PORT") {
            self.port = parse_override(k, v)?;
        }
        if let Some((k, v)) = var("RATE_LIMIT") {
            self.rate_limit = parse_override(k, v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.cache_ttl == 0 {
            return Err(ConfigError::Validation(
                "Cache TTL must be greater than 0".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_uppercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "Log level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        if self.environment.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Environment must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// `allowed_origins` split on commas, trimmed, blanks dropped.
    pub fn cors_origins(&self) -> Vec<&str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

fn parse_override<T: FromStr>(key: String, value: String) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidOverride { key, value })
}
