//! Handler for the `price` command.

use std::sync::Arc;

use tracing::{info, warn};

use super::command::PriceArgs;
use super::{output, report};
use crate::adapter::outbound::ebay::EbayClient;
use crate::adapter::outbound::llm::OpenAiCompatible;
use crate::app::Config;
use crate::application::{Appraisal, RelevanceFilter, Scout};
use crate::error::Result;

/// Execute `price`: fetch live listings, filter them, and recommend a price.
pub async fn execute(args: &PriceArgs) -> Result<()> {
    let mut config = Config::load_or_default(&args.config)?;
    apply_overrides(&mut config, args, output::verbosity());
    config.init_logging();

    let strategy = args.strategy.unwrap_or(config.pricing.default_strategy);
    info!(query = %args.query, %strategy, "Starting appraisal");

    let marketplace = Arc::new(EbayClient::from_config(&config.marketplace)?);
    let mut scout = Scout::new(marketplace);
    if let Some(filter) = relevance_filter(&config, args.no_filter) {
        scout = scout.with_filter(filter);
    }

    output::header(env!("CARGO_PKG_VERSION"));
    let pb = output::spinner(&format!("Appraising \"{}\"...", args.query));
    let appraisal = match scout.appraise(&args.query, strategy).await {
        Ok(appraisal) => {
            output::spinner_success(&pb, "Appraisal complete");
            appraisal
        }
        Err(err) => {
            output::spinner_fail(&pb, "Appraisal failed");
            return Err(err);
        }
    };

    if output::is_json() {
        let mut value = report::to_json(&appraisal.report, args.shipping);
        value["command"] = "price".into();
        value["query"] = appraisal.query.clone().into();
        value["listings"] = listing_counts(&appraisal);
        output::json_output(value);
        return Ok(());
    }

    output::section("Listings");
    output::field(
        "Active",
        format!("{} kept of {}", appraisal.kept_active, appraisal.fetched_active),
    );
    output::field(
        "Sold",
        format!("{} kept of {}", appraisal.kept_sold, appraisal.fetched_sold),
    );
    report::render(&appraisal.report, args.shipping);
    Ok(())
}

/// Fold command-line overrides into the loaded configuration.
fn apply_overrides(config: &mut Config, args: &PriceArgs, verbosity: u8) {
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    } else {
        config.logging = std::mem::take(&mut config.logging).with_verbosity(verbosity);
    }
    if args.json_logs {
        config.logging.format = "json".into();
    }
    if args.constraints.is_some() {
        config.llm.constraints.clone_from(&args.constraints);
    }
}

fn relevance_filter(config: &Config, no_filter: bool) -> Option<RelevanceFilter> {
    if no_filter || !config.llm.enabled {
        return None;
    }
    match OpenAiCompatible::from_config(&config.llm) {
        Ok(llm) => Some(
            RelevanceFilter::new(Arc::new(llm)).with_constraints(config.llm.constraints.clone()),
        ),
        Err(err) => {
            warn!(error = %err, "Relevance filter disabled");
            if !output::is_json() {
                output::warning(&format!("relevance filter disabled: {err}"));
            }
            None
        }
    }
}

fn listing_counts(appraisal: &Appraisal) -> serde_json::Value {
    serde_json::json!({
        "fetched_active": appraisal.fetched_active,
        "fetched_sold": appraisal.fetched_sold,
        "kept_active": appraisal.kept_active,
        "kept_sold": appraisal.kept_sold,
    })
}
