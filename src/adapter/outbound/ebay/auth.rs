//! OAuth client-credentials for the eBay APIs.
//!
//! The access token is an owned value with an explicit expiry; the client
//! that holds it decides when to refresh.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::error::MarketplaceError;

/// Scope granted to application tokens.
pub const API_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";

/// Path of the token endpoint relative to the auth base URL.
pub const TOKEN_PATH: &str = "identity/v1/oauth2/token";

/// Refresh this long before the server-side expiry.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Application credentials. `Debug` never prints the secret.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// A bearer token and the moment it stops being valid.
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    #[must_use]
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Token issued at `now` that lives for `expires_in_secs`.
    ///
    /// Fails when the lifetime does not fit a timestamp.
    pub fn issued(
        value: impl Into<String>,
        expires_in_secs: i64,
        now: DateTime<Utc>,
    ) -> Result<Self, MarketplaceError> {
        let expires_at = Duration::try_seconds(expires_in_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                MarketplaceError::Auth(format!("invalid token lifetime: {expires_in_secs}s"))
            })?;
        Ok(Self::new(value, expires_at))
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the token is still usable at `now`, keeping a safety skew.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_SKEW_SECS) < self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Body of a successful token response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    pub(crate) fn into_token(self, now: DateTime<Utc>) -> Result<AccessToken, MarketplaceError> {
        AccessToken::issued(self.access_token, self.expires_in, now)
    }
}
