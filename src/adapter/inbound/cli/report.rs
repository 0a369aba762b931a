//! Rendering of price reports.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::{MarketHealth, PriceReport};

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn money(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("${v:.2}"))
}

fn stat_rows(report: &PriceReport) -> Vec<StatRow> {
    let stats = &report.stats;
    vec![
        StatRow {
            metric: "Active listings",
            value: stats.active_count.to_string(),
        },
        StatRow {
            metric: "Sold listings",
            value: stats.sold_count.to_string(),
        },
        StatRow {
            metric: "Sell-through",
            value: format!("{:.2}", stats.sell_through_rate),
        },
        StatRow {
            metric: "Saturation",
            value: format!("{:.2}", stats.saturation),
        },
        StatRow {
            metric: "Lowest active",
            value: money(stats.lowest_active_total),
        },
        StatRow {
            metric: "Median sold",
            value: money(stats.median_sold_total),
        },
        StatRow {
            metric: "Sold p25-p75",
            value: stats.price_band.map_or_else(
                || "-".to_string(),
                |band| format!("${:.2} - ${:.2}", band.low, band.high),
            ),
        },
    ]
}

fn health(value: MarketHealth) -> String {
    match value {
        MarketHealth::Hot | MarketHealth::Steady => output::positive(value),
        MarketHealth::Slow | MarketHealth::Dead => output::negative(value),
    }
}

/// JSON view of a report, with the net list price when shipping is given.
#[must_use]
pub fn to_json(report: &PriceReport, shipping: Option<Decimal>) -> serde_json::Value {
    json!({
        "report": report,
        "shipping": shipping,
        "list_price": shipping.map(|s| report.list_price(s)),
    })
}

/// Print a report for humans.
pub fn render(report: &PriceReport, shipping: Option<Decimal>) {
    output::section("Recommendation");
    output::field("Strategy", report.strategy);
    output::field(
        "Total price",
        output::strong(format!("${:.2}", report.recommended_price)),
    );
    if let Some(shipping) = shipping {
        let list = report.list_price(shipping);
        output::field("Shipping", format!("${shipping:.2}"));
        output::field("List price", output::highlight(format!("${list:.2}")));
        if list <= Decimal::ZERO {
            output::warning("shipping cost meets or exceeds the recommended total");
        }
    }
    output::field("Sell probability", format!("{}%", report.sell_probability));
    output::field("Market health", health(report.market_health));

    output::section("Market");
    output::lines(&Table::new(stat_rows(report)).to_string());
}
