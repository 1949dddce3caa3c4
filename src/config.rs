//! Runtime configuration.
//!
//! Environment and port come from env vars (a `.env` file is loaded by the
//! binaries through `dotenvy`). Engine tunables live in `ConfluenceConfig`,
//! which can be overridden with a JSON file named by `YODHA_CONFIG`.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "YODHA_CONFIG";
const DEFAULT_PORT: u16 = 8080;

const POSITIVE_KEYWORDS: [&str; 10] = [
    "surge", "rally", "gain", "beat", "upgrade", "bull", "growth", "record", "soar", "jump",
];

const NEGATIVE_KEYWORDS: [&str; 10] = [
    "drop", "fall", "crash", "miss", "downgrade", "bear", "cut", "decline", "plunge", "weak",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Deployment environment name, `sandbox` unless told otherwise.
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENVIRONMENT"))
        .map(|v| v.trim().to_lowercase())
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "sandbox".to_string())
}

/// Headline keyword sets used to score news sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsKeywords {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for NewsKeywords {
    fn default() -> Self {
        Self {
            positive: POSITIVE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            negative: NEGATIVE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl NewsKeywords {
    pub fn new(positive: Vec<String>, negative: Vec<String>) -> Result<Self, ConfigError> {
        let keywords = Self { positive, negative };
        keywords.validate()?;
        Ok(keywords.normalized())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.positive.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "news_keywords.positive must contain at least one keyword".to_string(),
            ));
        }
        if self.negative.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "news_keywords.negative must contain at least one keyword".to_string(),
            ));
        }
        Ok(())
    }

    /// Matching is case-insensitive, so keywords are stored trimmed and lower-cased.
    fn normalized(self) -> Self {
        fn clean(words: Vec<String>) -> Vec<String> {
            let mut out: Vec<String> = Vec::with_capacity(words.len());
            for word in words {
                let word = word.trim().to_lowercase();
                if !word.is_empty() && !out.contains(&word) {
                    out.push(word);
                }
            }
            out
        }
        Self {
            positive: clean(self.positive),
            negative: clean(self.negative),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfluenceConfig {
    #[serde(default)]
    pub news_keywords: NewsKeywords,
}

impl ConfluenceConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: ConfluenceConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(Self {
            news_keywords: config.news_keywords.normalized(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.news_keywords.validate()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Loads the file named by `YODHA_CONFIG`, or the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => {
                tracing::info!(path = %path, "Loading confluence config");
                Self::from_file(path.trim())
            }
            _ => Ok(Self::default()),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { port }
    }
}
