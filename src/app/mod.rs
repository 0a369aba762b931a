//! Application layer: configuration.

pub mod config;

pub use config::{Condition, Config, LlmConfig, LoggingConfig, MarketplaceConfig, PricingConfig};
