//! Strategy listing and explanation.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::Strategy;
use crate::error::Result;

#[derive(Tabled)]
struct StrategyRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Price")]
    summary: &'static str,
    #[tabled(rename = "Goal")]
    goal: &'static str,
}

const fn goal(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::FastFlip => "sell fast",
        Strategy::MaxProfit => "sell high",
    }
}

const fn details(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::FastFlip => {
            "Prices just under the market to move the item quickly.

Price:
  min(lowest active total x 0.98, sold p20)
  falls back to the sold median when nothing is listed

Example:
  active totals 24, 26, 27, 29, 31
  sold totals   20, 22, 25, 28, 30
  -> min(23.52, 21.60) = 21.60

With no sales at all:
  lowest active total x 0.90 (market marked Dead)"
        }
        Strategy::MaxProfit => {
            "Aims for the middle or top of recent sales while staying on the
first page of competing listings.

Price:
  sold median, or sold p75 when the market is Hot (sell-through above 1.0)
  capped at the 3rd-cheapest active total when 3+ competitors exist

Example:
  sold totals 20, 22, 25, 28, 30 (median 25)
  active totals 24, 26, 27, 29, 31 (3rd cheapest 27)
  -> min(25, 27) = 25

With no sales at all:
  lowest active total x 0.90 (market marked Dead)"
        }
    }
}

/// List available strategies.
pub fn list() -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    if output::is_json() {
        let strategies: Vec<_> = Strategy::ALL
            .iter()
            .map(|s| {
                json!({
                    "name": s.as_str(),
                    "summary": s.summary(),
                    "goal": goal(*s),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "strategies.list",
            "strategies": strategies,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Available strategies");

    let rows: Vec<_> = Strategy::ALL
        .iter()
        .map(|s| StrategyRow {
            name: s.as_str(),
            summary: s.summary(),
            goal: goal(*s),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    output::hint(&format!(
        "run {} for details",
        output::highlight("pricescout strategies explain <name>")
    ));

    Ok(())
}

/// Explain a specific strategy.
pub fn explain(name: &str) -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let parsed = name.parse::<Strategy>();

    if output::is_json() {
        let payload = match parsed {
            Ok(strategy) => json!({
                "command": "strategies.explain",
                "strategy": strategy.as_str(),
                "summary": strategy.summary(),
                "details": details(strategy),
            }),
            Err(_) => json!({
                "command": "strategies.explain",
                "status": "unknown_strategy",
                "requested": name,
                "available": Strategy::ALL.map(Strategy::as_str),
            }),
        };
        output::json_output(payload);
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));

    match parsed {
        Ok(strategy) => {
            output::section(strategy.as_str());
            output::lines(details(strategy));
        }
        Err(err) => {
            output::error(&err.to_string());
            output::hint("available strategies: fast-flip, max-profit");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_strategy_has_details() {
        for strategy in Strategy::ALL {
            assert!(details(strategy).contains("Price:"));
            assert!(!goal(strategy).is_empty());
        }
    }
}
