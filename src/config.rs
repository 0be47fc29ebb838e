use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_FEATURES: usize = 5000;
pub const DEFAULT_TOP_N: usize = 5;
/// likes based queries ask for more than one result so the caller has backups to post-filter
pub const DEFAULT_LIKES_TOP_N: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    NotAnInteger { var: &'static str, value: String },
    #[error("max_features must be greater than zero")]
    ZeroMaxFeatures,
}

/// Recommender settings
/// `from_env` overlays `MAX_FEATURES` and `N_RECS_DEFAULT` on the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// vocabulary cap for the vectorizer
    pub max_features: usize,
    /// result count for single item queries
    pub default_top_n: usize,
    /// result count for likes based queries
    pub likes_top_n: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            default_top_n: DEFAULT_TOP_N,
            likes_top_n: DEFAULT_LIKES_TOP_N,
        }
    }
}

impl RecommenderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build a config from an arbitrary variable lookup
    /// unset variables keep their default
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup("MAX_FEATURES") {
            config.max_features = parse_usize("MAX_FEATURES", &value)?;
        }
        if let Some(value) = lookup("N_RECS_DEFAULT") {
            config.default_top_n = parse_usize("N_RECS_DEFAULT", &value)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_features == 0 {
            return Err(ConfigError::ZeroMaxFeatures);
        }
        Ok(())
    }
}

fn parse_usize(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotAnInteger {
        var,
        value: value.to_string(),
    })
}
