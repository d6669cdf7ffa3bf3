use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::constants::DEFAULT_CURRENCY;
use crate::trades::{BucketGranularity, DedupStrategy};

const ENV_CURRENCY: &str = "FUNDRAISE_CURRENCY";
const ENV_DEDUP_STRATEGY: &str = "FUNDRAISE_DEDUP_STRATEGY";
const ENV_BUCKET: &str = "FUNDRAISE_BUCKET";
const ENV_RECENT_LIMIT: &str = "FUNDRAISE_RECENT_LIMIT";
const ENV_LOG_LEVEL: &str = "FUNDRAISE_LOG_LEVEL";

/// Presentation defaults a caller hands to the engine functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    // Ledger
    #[validate(length(min = 1, max = 16), custom = "validate_currency")]
    pub currency: String,
    #[validate(range(min = 1, max = 1000))]
    pub recent_limit: usize,

    // Price chart
    pub dedup_strategy: DedupStrategy,
    pub bucket: BucketGranularity,

    #[validate(custom = "validate_log_level")]
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            recent_limit: 10,
            dedup_strategy: DedupStrategy::Latest,
            bucket: BucketGranularity::Day,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Read `FUNDRAISE_*` variables, loading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(currency) = lookup(ENV_CURRENCY) {
            config.currency = currency.trim().to_string();
        }
        if let Some(strategy) = lookup(ENV_DEDUP_STRATEGY) {
            config.dedup_strategy = strategy.parse::<DedupStrategy>().context(ENV_DEDUP_STRATEGY)?;
        }
        if let Some(bucket) = lookup(ENV_BUCKET) {
            config.bucket = bucket.parse::<BucketGranularity>().context(ENV_BUCKET)?;
        }
        if let Some(limit) = lookup(ENV_RECENT_LIMIT) {
            config.recent_limit = limit
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{} must be a positive integer", ENV_RECENT_LIMIT))?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level.trim().to_ascii_lowercase();
        }

        config.validate_all()?;
        Ok(config)
    }

    pub fn validate_all(&self) -> Result<()> {
        if let Err(e) = self.validate() {
            return Err(anyhow!("Configuration validation failed: {:?}", e));
        }
        Ok(())
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

fn validate_currency(currency: &str) -> Result<(), ValidationError> {
    if !currency.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new("invalid_currency"));
    }
    Ok(())
}

fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "off" | "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}
