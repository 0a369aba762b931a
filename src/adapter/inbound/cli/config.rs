//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::app::Config;
use crate::error::Result;

/// Execute `config validate`.
///
/// Unlike the other commands, a missing file is an error here.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "valid": true,
            "path": path.display().to_string(),
            "warnings": warnings(&config),
        }));
        return Ok(());
    }

    output::success(&format!("{} is valid", path.display()));
    for warning in warnings(&config) {
        output::warning(&warning);
    }
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;
    let source = if path.exists() {
        path.display().to_string()
    } else {
        "built-in defaults".to_string()
    };

    if output::is_json() {
        output::json_output(effective_json(&config, &source));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Source", &source);

    let market = &config.marketplace;
    output::section("Marketplace");
    output::field("Marketplace", &market.marketplace_id);
    output::field("API", &market.api_url);
    output::field("Auth", &market.auth_url);
    output::field("Search limit", market.search_limit);
    output::field(
        "Condition",
        market.condition.map_or("any", |c| c.as_filter()),
    );
    output::field(
        "Price range",
        format!("{}..{} {}", market.min_price, market.max_price, market.currency),
    );
    output::field("Timeout", format!("{}ms", market.timeout_ms));
    output::field(
        "Credentials",
        loaded(market.client_id.is_some() && market.client_secret.is_some()),
    );

    let llm = &config.llm;
    output::section("Relevance Filter");
    output::field("Enabled", if llm.enabled { "yes" } else { "no" });
    if llm.enabled {
        output::field("Endpoint", &llm.api_url);
        output::field("Model", &llm.model);
        output::field("Temperature", llm.temperature);
        output::field("Max tokens", llm.max_tokens);
        output::field("Constraints", llm.constraints.as_deref().unwrap_or("-"));
        output::field("API key", loaded(llm.api_key.is_some()));
    }

    output::section("Pricing");
    output::field("Default strategy", config.pricing.default_strategy);

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    Ok(())
}

const fn loaded(present: bool) -> &'static str {
    if present {
        "loaded from environment"
    } else {
        "not set"
    }
}

/// Problems that do not make the file invalid but will bite at run time.
fn warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.marketplace.client_id.is_none() || config.marketplace.client_secret.is_none() {
        warnings.push("EBAY_CLIENT_ID / EBAY_CLIENT_SECRET not set; `price` will fail".into());
    }
    if config.llm.enabled && config.llm.api_key.is_none() {
        warnings.push("GROQ_API_KEY not set; relevance filtering will be skipped".into());
    }
    warnings
}

/// Secrets are reported as present or absent, never echoed.
fn effective_json(config: &Config, source: &str) -> serde_json::Value {
    let market = &config.marketplace;
    let llm = &config.llm;
    json!({
        "command": "config.show",
        "source": source,
        "marketplace": {
            "marketplace_id": market.marketplace_id,
            "api_url": market.api_url,
            "auth_url": market.auth_url,
            "search_limit": market.search_limit,
            "condition": market.condition.map(|c| c.as_filter()),
            "min_price": market.min_price,
            "max_price": market.max_price,
            "currency": market.currency,
            "timeout_ms": market.timeout_ms,
            "credentials_loaded": market.client_id.is_some() && market.client_secret.is_some(),
        },
        "llm": {
            "enabled": llm.enabled,
            "api_url": llm.api_url,
            "model": llm.model,
            "temperature": llm.temperature,
            "max_tokens": llm.max_tokens,
            "constraints": llm.constraints,
            "timeout_ms": llm.timeout_ms,
            "api_key_loaded": llm.api_key.is_some(),
        },
        "pricing": {
            "default_strategy": config.pricing.default_strategy,
        },
        "logging": {
            "level": config.logging.level,
            "format": config.logging.format,
        },
    })
}
