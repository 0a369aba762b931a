//! Marketplace listings and their normalization to a landed total.
//!
//! Upstream data arrives with shipping in one of two shapes: a flat cost
//! field, or a list of shipping options of which the first one applies.
//! Both are resolved here, once, into a single [`TotalCost`].

use rust_decimal::Decimal;
use serde::Deserialize;

use super::money::{Amount, TotalCost};

/// One shipping option offered on a listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShippingOption {
    #[serde(default, alias = "shippingCost")]
    pub shipping_cost: Option<Amount>,
}

/// Shipping cost in either of the upstream representations.
#[derive(Debug, Clone, PartialEq)]
pub enum Shipping {
    /// A single cost field on the listing.
    Flat(Amount),
    /// A list of options; the first one is the applicable cost.
    Nested(Vec<ShippingOption>),
}

impl Shipping {
    /// Resolved shipping cost, or `None` when missing or non-numeric.
    #[must_use]
    pub fn cost(&self) -> Option<Decimal> {
        match self {
            Self::Flat(amount) => amount.value(),
            Self::Nested(options) => options
                .first()
                .and_then(|o| o.shipping_cost.as_ref())
                .and_then(Amount::value),
        }
    }
}

/// A listing record as handed to the pricing core.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ListingRecord")]
pub struct Listing {
    pub id: Option<String>,
    pub title: Option<String>,
    pub price: Option<Amount>,
    pub shipping: Option<Shipping>,
}

impl Listing {
    /// Create a listing with a price and no shipping.
    #[must_use]
    pub fn new(price: Decimal) -> Self {
        Self {
            id: None,
            title: None,
            price: Some(Amount::new(price)),
            shipping: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_shipping(mut self, shipping: Shipping) -> Self {
        self.shipping = Some(shipping);
        self
    }

    /// Item price, or `None` when missing or non-numeric.
    #[must_use]
    pub fn item_price(&self) -> Option<Decimal> {
        self.price.as_ref().and_then(Amount::value)
    }

    /// Total landed cost: item price plus shipping (zero when absent).
    ///
    /// Returns `None` for a missing or non-numeric price, for totals that
    /// are not strictly positive, and for sums that overflow.
    #[must_use]
    pub fn total_cost(&self) -> Option<TotalCost> {
        let price = self.item_price()?;
        let shipping = self
            .shipping
            .as_ref()
            .and_then(Shipping::cost)
            .unwrap_or(Decimal::ZERO);
        price.checked_add(shipping).and_then(TotalCost::new)
    }
}

/// Wire shape accepted for listings: flat or nested shipping.
#[derive(Debug, Deserialize)]
struct ListingRecord {
    #[serde(default, alias = "itemId")]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    price: Option<Amount>,
    #[serde(default, alias = "shippingCost")]
    shipping_cost: Option<Amount>,
    #[serde(default, alias = "shippingOptions")]
    shipping_options: Option<Vec<ShippingOption>>,
}

impl From<ListingRecord> for Listing {
    fn from(record: ListingRecord) -> Self {
        let shipping = match (record.shipping_cost, record.shipping_options) {
            (Some(flat), _) => Some(Shipping::Flat(flat)),
            (None, Some(options)) => Some(Shipping::Nested(options)),
            (None, None) => None,
        };
        Self {
            id: record.id,
            title: record.title,
            price: record.price,
            shipping,
        }
    }
}
