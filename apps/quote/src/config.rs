//! Quote CLI configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `NIRAMAYA_DEFAULT_TIER` | `standard` | Tier when neither flag nor cart file names one |
//! | `NIRAMAYA_PRETTY_JSON` | `true` | Indent the printed quote |
//! | `NIRAMAYA_LOG` | `info` | `tracing` filter directive |

use std::env;

use niramaya_core::DiscountTier;
use serde::{Deserialize, Serialize};

/// Quote CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Tier used when the command line and the cart file are both silent.
    pub default_tier: DiscountTier,

    /// Pretty-print the output JSON.
    pub pretty_json: bool,

    /// `EnvFilter` directive for logging.
    pub log_filter: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        QuoteConfig {
            default_tier: DiscountTier::Standard,
            pretty_json: true,
            log_filter: "info".to_string(),
        }
    }
}

impl QuoteConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = QuoteConfig::default();

        let default_tier = match lookup("NIRAMAYA_DEFAULT_TIER") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("NIRAMAYA_DEFAULT_TIER".to_string()))?,
            None => defaults.default_tier,
        };

        let pretty_json = match lookup("NIRAMAYA_PRETTY_JSON") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("NIRAMAYA_PRETTY_JSON".to_string()))?,
            None => defaults.pretty_json,
        };

        let log_filter = lookup("NIRAMAYA_LOG")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(QuoteConfig {
            default_tier,
            pretty_json,
            log_filter,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
