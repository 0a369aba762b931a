//! Builders for listings used across tests.

use rust_decimal::Decimal;

use crate::domain::{Amount, Listing, Shipping, ShippingOption};

/// Listings with the given prices and no shipping, ids `l0`, `l1`, ...
pub fn priced(prices: &[Decimal]) -> Vec<Listing> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| Listing::new(*p).with_id(format!("l{i}")))
        .collect()
}

/// Listing with a flat shipping cost.
pub fn with_flat_shipping(price: Decimal, shipping: Decimal) -> Listing {
    Listing::new(price).with_shipping(Shipping::Flat(Amount::new(shipping)))
}

/// Listing with shipping given as a single nested option.
pub fn with_nested_shipping(price: Decimal, shipping: Decimal) -> Listing {
    Listing::new(price).with_shipping(Shipping::Nested(vec![ShippingOption {
        shipping_cost: Some(Amount::new(shipping)),
    }]))
}

/// Listing whose price is not a number.
pub fn malformed(price: &str) -> Listing {
    Listing {
        id: None,
        title: None,
        price: Some(Amount::from(serde_json::Value::String(price.to_string()))),
        shipping: None,
    }
}
