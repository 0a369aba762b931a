//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for secrets (`EBAY_CLIENT_ID`, `EBAY_CLIENT_SECRET`,
//! `GROQ_API_KEY`).

use serde::Deserialize;
use std::path::Path;

use crate::domain::Strategy;
use crate::error::{ConfigError, Result};

mod llm;
mod logging;
mod marketplace;

pub use llm::LlmConfig;
pub use logging::LoggingConfig;
pub use marketplace::{Condition, MarketplaceConfig};

/// Largest page size the Browse API accepts.
const MAX_SEARCH_LIMIT: u32 = 200;

/// Pricing defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingConfig {
    /// Strategy used when the command line does not pick one.
    #[serde(default)]
    pub default_strategy: Strategy,
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub marketplace: MarketplaceConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate a configuration file, then apply secrets from the
    /// process environment.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config = Self::parse(&content)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse and validate TOML without touching the environment.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Fill secrets from an environment lookup.
    ///
    /// `EBAY_*` names take precedence over the bare `CLIENT_ID` /
    /// `CLIENT_SECRET` names.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        self.marketplace.client_id = non_empty("EBAY_CLIENT_ID").or_else(|| non_empty("CLIENT_ID"));
        self.marketplace.client_secret =
            non_empty("EBAY_CLIENT_SECRET").or_else(|| non_empty("CLIENT_SECRET"));
        self.llm.api_key = non_empty("GROQ_API_KEY");
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        let market = &self.marketplace;
        if market.marketplace_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "marketplace_id",
            }
            .into());
        }
        for (field, value) in [("api_url", &market.api_url), ("auth_url", &market.auth_url)] {
            url::Url::parse(value).map_err(|e| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            })?;
        }
        if market.search_limit == 0 || market.search_limit > MAX_SEARCH_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "search_limit",
                reason: format!("must be between 1 and {MAX_SEARCH_LIMIT}"),
            }
            .into());
        }
        if market.min_price.is_sign_negative() {
            return Err(ConfigError::InvalidValue {
                field: "min_price",
                reason: "must not be negative".into(),
            }
            .into());
        }
        if market.min_price > market.max_price {
            return Err(ConfigError::InvalidValue {
                field: "max_price",
                reason: format!(
                    "must be at least min_price ({} > {})",
                    market.min_price, market.max_price
                ),
            }
            .into());
        }
        if market.currency.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "currency" }.into());
        }

        let llm = &self.llm;
        url::Url::parse(&llm.api_url).map_err(|e| ConfigError::InvalidValue {
            field: "llm.api_url",
            reason: e.to_string(),
        })?;
        if !(0.0..=2.0).contains(&llm.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "temperature",
                reason: "must be between 0.0 and 2.0".into(),
            }
            .into());
        }
        if llm.model.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "model" }.into());
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
