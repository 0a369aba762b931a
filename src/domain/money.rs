//! Monetary types for listing prices and landed totals.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal places kept on every monetary output.
pub const MONEY_DP: u32 = 2;

/// Round a monetary value to cents.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(MONEY_DP);
    rounded.rescale(MONEY_DP);
    rounded
}

/// Parse a decimal from text, accepting scientific notation.
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Total landed cost of one listing: item price plus shipping.
///
/// Always strictly positive; construct through [`TotalCost::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TotalCost(Decimal);

impl TotalCost {
    /// Wrap a total, rejecting zero and negative values.
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        (value > Decimal::ZERO).then_some(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for TotalCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A raw amount as delivered by upstream JSON.
///
/// Accepts a number, a numeric string, or an object carrying a `value`
/// field (the marketplace's `{"value": "12.50", "currency": "USD"}` shape).
/// Anything else is kept as-is and reads back as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Amount(serde_json::Value);

impl Amount {
    #[must_use]
    pub fn new(value: Decimal) -> Self {
        Self(serde_json::Value::String(value.to_string()))
    }

    /// Numeric value, or `None` when missing or non-numeric.
    #[must_use]
    pub fn value(&self) -> Option<Decimal> {
        decimal_from_json(&self.0)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<serde_json::Value> for Amount {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

fn decimal_from_json(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => parse_decimal(&n.to_string()),
        serde_json::Value::String(s) => parse_decimal(s),
        serde_json::Value::Object(map) => map.get("value").and_then(decimal_from_json),
        _ => None,
    }
}
