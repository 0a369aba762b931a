//! Handler for the `evaluate` command.
//!
//! Runs the pricing model over listings saved as JSON arrays, so a search
//! can be re-priced under another strategy without hitting the network.

use std::path::Path;

use tracing::debug;

use super::command::EvaluateArgs;
use super::{output, report};
use crate::app::LoggingConfig;
use crate::domain::{evaluate, Listing};
use crate::error::Result;

/// Execute `evaluate`.
pub fn execute(args: &EvaluateArgs) -> Result<()> {
    LoggingConfig::default()
        .with_verbosity(output::verbosity())
        .init();

    let active = read_listings(&args.active)?;
    let sold = read_listings(&args.sold)?;
    debug!(active = active.len(), sold = sold.len(), "Loaded listing files");

    let price_report = evaluate(&active, &sold, args.strategy)?;

    if output::is_json() {
        let mut value = report::to_json(&price_report, args.shipping);
        value["command"] = "evaluate".into();
        output::json_output(value);
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Active file", args.active.display());
    output::field("Sold file", args.sold.display());
    report::render(&price_report, args.shipping);
    Ok(())
}

/// Read a JSON array of listings.
fn read_listings(path: &Path) -> Result<Vec<Listing>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
