//! eBay marketplace configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Item condition filter for searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    /// Browse API filter token.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Used => "USED",
        }
    }
}

/// Marketplace connection and search settings.
///
/// Credentials never come from the file; they are read from
/// `EBAY_CLIENT_ID` / `EBAY_CLIENT_SECRET` at load time.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceConfig {
    /// Marketplace (country) identifier sent as `X-EBAY-C-MARKETPLACE-ID`.
    #[serde(default = "default_marketplace_id")]
    pub marketplace_id: String,
    /// Browse API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// OAuth base URL.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    /// Listings requested per search.
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    /// Optional condition filter.
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default = "default_min_price")]
    pub min_price: Decimal,
    #[serde(default = "default_max_price")]
    pub max_price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(skip)]
    pub client_id: Option<String>,
    #[serde(skip)]
    pub client_secret: Option<String>,
}

fn default_marketplace_id() -> String {
    "EBAY_US".into()
}

fn default_api_url() -> String {
    "https://api.ebay.com".into()
}

fn default_auth_url() -> String {
    "https://api.ebay.com".into()
}

const fn default_search_limit() -> u32 {
    50
}

fn default_min_price() -> Decimal {
    Decimal::from(5)
}

fn default_max_price() -> Decimal {
    Decimal::from(5000)
}

fn default_currency() -> String {
    "USD".into()
}

const fn default_timeout_ms() -> u64 {
    15_000
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            marketplace_id: default_marketplace_id(),
            api_url: default_api_url(),
            auth_url: default_auth_url(),
            search_limit: default_search_limit(),
            condition: None,
            min_price: default_min_price(),
            max_price: default_max_price(),
            currency: default_currency(),
            timeout_ms: default_timeout_ms(),
            client_id: None,
            client_secret: None,
        }
    }
}
