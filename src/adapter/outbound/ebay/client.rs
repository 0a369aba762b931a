//! eBay Browse API client.
//!
//! Searches item summaries for the active side of the market and, as a
//! best effort, the sold side. The Browse API does not expose completed
//! sales to ordinary application keys; the sold search narrows to
//! fixed-price listings as the closest available proxy.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client as HttpClient;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use super::auth::{AccessToken, Credentials, TokenResponse, API_SCOPE, TOKEN_PATH};
use super::dto::{SearchResponse, SEARCH_PATH};
use crate::app::MarketplaceConfig;
use crate::domain::Listing;
use crate::error::{ConfigError, MarketplaceError, Result};
use crate::port::outbound::marketplace::{ListingKind, Marketplace, SearchQuery};

/// HTTP client for the eBay Browse API.
///
/// Owns its application credentials and the current access token. The
/// token is shared by concurrent searches and refreshed under the lock, so
/// only one refresh is in flight at a time.
pub struct EbayClient {
    http: HttpClient,
    credentials: Credentials,
    token: Mutex<Option<AccessToken>>,
    token_url: Url,
    search_url: Url,
    marketplace_id: String,
    search_limit: u32,
    filter: SearchFilter,
}

impl EbayClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error when credentials are missing or a base URL
    /// does not parse.
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &MarketplaceConfig) -> Result<Self> {
        let client_id = config.client_id.clone().ok_or(ConfigError::MissingField {
            field: "EBAY_CLIENT_ID",
        })?;
        let client_secret = config
            .client_secret
            .clone()
            .ok_or(ConfigError::MissingField {
                field: "EBAY_CLIENT_SECRET",
            })?;

        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self {
            http,
            credentials: Credentials {
                client_id,
                client_secret,
            },
            token: Mutex::new(None),
            token_url: endpoint(&config.auth_url, TOKEN_PATH)?,
            search_url: endpoint(&config.api_url, SEARCH_PATH)?,
            marketplace_id: config.marketplace_id.clone(),
            search_limit: config.search_limit,
            filter: SearchFilter::from_config(config),
        })
    }

    /// Fetch a new access token, replacing the cached one.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Auth`] when the token endpoint rejects
    /// the credentials.
    pub async fn refresh(&self) -> Result<AccessToken> {
        let mut slot = self.token.lock().await;
        let token = self.request_token().await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    /// Current bearer token, refreshed when missing or about to expire.
    async fn bearer(&self) -> Result<String> {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            return Ok(token.value().to_string());
        }
        let token = self.request_token().await?;
        let value = token.value().to_string();
        *slot = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<AccessToken> {
        debug!(url = %self.token_url, "Requesting eBay access token");

        let response = self
            .http
            .post(self.token_url.clone())
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", API_SCOPE),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(
                MarketplaceError::Auth(format!("token endpoint returned {status}: {body}")).into(),
            );
        }

        let token = response.json::<TokenResponse>().await?.into_token(Utc::now())?;
        info!(expires_at = %token.expires_at(), "Obtained eBay access token");
        Ok(token)
    }
}

#[async_trait]
impl Marketplace for EbayClient {
    fn name(&self) -> &'static str {
        "ebay"
    }

    async fn search(&self, query: &SearchQuery, kind: ListingKind) -> Result<Vec<Listing>> {
        let bearer = self.bearer().await?;
        let filter = self.filter.render(kind);
        let limit = self.search_limit.to_string();

        info!(query = %query.text, kind = %kind, "Searching eBay listings");

        let response = self
            .http
            .get(self.search_url.clone())
            .bearer_auth(bearer)
            .header("X-EBAY-C-MARKETPLACE-ID", &self.marketplace_id)
            .query(&[
                ("q", query.text.as_str()),
                ("limit", limit.as_str()),
                ("filter", filter.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketplaceError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed: SearchResponse = response.json().await?;
        let listings: Vec<Listing> = parsed.item_summaries.into_iter().map(Listing::from).collect();
        debug!(kind = %kind, count = listings.len(), total = ?parsed.total, "Fetched listings");

        Ok(listings)
    }
}

fn endpoint(base: &str, path: &str) -> Result<Url> {
    let mut base = Url::parse(base)?;
    if !base.path().ends_with('/') {
        let joined = format!("{}/", base.path());
        base.set_path(&joined);
    }
    Ok(base.join(path)?)
}

/// Browse API `filter` parameter built from configuration.
#[derive(Debug, Clone, PartialEq)]
struct SearchFilter {
    price_range: String,
    condition: Option<&'static str>,
}

impl SearchFilter {
    fn from_config(config: &MarketplaceConfig) -> Self {
        Self {
            price_range: format!(
                "price:[{}..{}],priceCurrency:{}",
                config.min_price.normalize(),
                config.max_price.normalize(),
                config.currency
            ),
            condition: config.condition.map(|c| c.as_filter()),
        }
    }

    fn render(&self, kind: ListingKind) -> String {
        let mut filter = self.price_range.clone();
        if let Some(condition) = self.condition {
            filter.push_str(&format!(",conditions:{{{condition}}}"));
        }
        if kind == ListingKind::Sold {
            filter.push_str(",buyingOptions:{FIXED_PRICE}");
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Condition;
    use rust_decimal_macros::dec;

    fn config() -> MarketplaceConfig {
        MarketplaceConfig {
            client_id: Some("id".into()),
            client_secret: Some("secret".into()),
            ..MarketplaceConfig::default()
        }
    }

    #[test]
    fn filter_for_active_has_price_range_only() {
        let filter = SearchFilter::from_config(&config());
        assert_eq!(filter.render(ListingKind::Active), "price:[5..5000],priceCurrency:USD");
    }

    #[test]
    fn filter_for_sold_adds_fixed_price_and_condition() {
        let mut config = config();
        config.condition = Some(Condition::Used);
        config.min_price = dec!(7.50);
        let filter = SearchFilter::from_config(&config);
        assert_eq!(
            filter.render(ListingKind::Sold),
            "price:[7.5..5000],priceCurrency:USD,conditions:{USED},buyingOptions:{FIXED_PRICE}"
        );
    }

    #[test]
    fn endpoints_join_under_base_path() {
        assert_eq!(
            endpoint("https://api.ebay.com", SEARCH_PATH).unwrap().as_str(),
            "https://api.ebay.com/buy/browse/v1/item_summary/search"
        );
        assert_eq!(
            endpoint("https://api.sandbox.ebay.com/", TOKEN_PATH).unwrap().as_str(),
            "https://api.sandbox.ebay.com/identity/v1/oauth2/token"
        );
        assert_eq!(
            endpoint("http://localhost:8080/proxy", SEARCH_PATH).unwrap().as_str(),
            "http://localhost:8080/proxy/buy/browse/v1/item_summary/search"
        );
    }

    #[test]
    fn from_config_requires_credentials() {
        let mut config = config();
        config.client_secret = None;
        let err = EbayClient::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("EBAY_CLIENT_SECRET"));
    }

    #[tokio::test]
    async fn starts_without_token() {
        let client = EbayClient::from_config(&config()).unwrap();
        assert!(client.token.lock().await.is_none());
        assert_eq!(client.name(), "ebay");
    }
}
