//! Output of the pricing model.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::strategy::Strategy;

/// Demand-versus-supply label derived from the sell-through ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarketHealth {
    /// No recorded sales.
    Dead,
    Slow,
    Steady,
    /// Sales outnumber live competitors.
    Hot,
}

impl MarketHealth {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dead => "Dead",
            Self::Slow => "Slow",
            Self::Steady => "Steady",
            Self::Hot => "Hot",
        }
    }
}

impl fmt::Display for MarketHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interquartile range of sold totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBand {
    pub low: Decimal,
    pub high: Decimal,
}

/// Market statistics behind a recommendation. Monetary fields are rounded
/// to cents, ratios to two places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketStats {
    pub active_count: usize,
    pub sold_count: usize,
    pub sell_through_rate: Decimal,
    pub saturation: Decimal,
    pub lowest_active_total: Option<Decimal>,
    pub median_sold_total: Option<Decimal>,
    pub price_band: Option<PriceBand>,
}

/// A price recommendation. All prices are landed totals (item plus
/// shipping); subtracting the seller's own shipping is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceReport {
    pub strategy: Strategy,
    pub recommended_price: Decimal,
    pub sell_probability: u8,
    pub market_health: MarketHealth,
    pub stats: MarketStats,
}

impl PriceReport {
    /// Item-only list price once the seller's shipping cost is removed.
    #[must_use]
    pub fn list_price(&self, shipping: Decimal) -> Decimal {
        self.recommended_price - shipping
    }
}
