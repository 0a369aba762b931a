//! Browse API response types.

use serde::Deserialize;

use crate::domain::{Amount, Listing, Shipping, ShippingOption};

/// Path of the item summary search relative to the API base URL.
pub const SEARCH_PATH: &str = "buy/browse/v1/item_summary/search";

/// `item_summary/search` response. Missing `itemSummaries` means no hits.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub item_summaries: Vec<ItemSummary>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// One search hit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub item_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<Amount>,
    #[serde(default)]
    pub shipping_options: Option<Vec<ShippingOption>>,
}

impl From<ItemSummary> for Listing {
    fn from(item: ItemSummary) -> Self {
        Self {
            id: Some(item.item_id),
            title: item.title,
            price: item.price,
            shipping: item.shipping_options.map(Shipping::Nested),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TotalCost;
    use rust_decimal_macros::dec;

    #[test]
    fn converts_summaries_to_listings() {
        let body = r#"{
            "href": "https://api.ebay.com/buy/browse/v1/item_summary/search?q=controller",
            "total": 2,
            "itemSummaries": [
                {
                    "itemId": "v1|1|0",
                    "title": "Xbox Series X Controller - Carbon Black",
                    "price": {"value": "39.99", "currency": "USD"},
                    "shippingOptions": [
                        {"shippingCostType": "FIXED", "shippingCost": {"value": "5.00", "currency": "USD"}}
                    ]
                },
                {
                    "itemId": "v1|2|0",
                    "title": "Controller (parts only)",
                    "price": {"value": "12.00", "currency": "USD"}
                }
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total, Some(2));

        let listings: Vec<Listing> = response.item_summaries.into_iter().map(Listing::from).collect();
        assert_eq!(listings[0].id.as_deref(), Some("v1|1|0"));
        assert_eq!(listings[0].total_cost().map(TotalCost::value), Some(dec!(44.99)));
        assert_eq!(listings[1].total_cost().map(TotalCost::value), Some(dec!(12.00)));
    }

    #[test]
    fn missing_summaries_is_empty() {
        let response: SearchResponse = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert!(response.item_summaries.is_empty());
    }
}
