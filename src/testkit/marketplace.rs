//! Scripted marketplace.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::Listing;
use crate::error::{Error, MarketplaceError, Result};
use crate::port::outbound::marketplace::{ListingKind, Marketplace, SearchQuery};

/// Returns pre-loaded listings per kind; a kind without listings yields an
/// empty result. Can be set to fail every search.
#[derive(Default)]
pub struct ScriptedMarketplace {
    listings: HashMap<ListingKind, Vec<Listing>>,
    fail_auth: bool,
    searches: AtomicUsize,
}

impl ScriptedMarketplace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(mut self, listings: Vec<Listing>) -> Self {
        self.listings.insert(ListingKind::Active, listings);
        self
    }

    pub fn with_sold(mut self, listings: Vec<Listing>) -> Self {
        self.listings.insert(ListingKind::Sold, listings);
        self
    }

    /// Make every search fail with an authentication error.
    pub fn failing_auth(mut self) -> Self {
        self.fail_auth = true;
        self
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Marketplace for ScriptedMarketplace {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn search(&self, _query: &SearchQuery, kind: ListingKind) -> Result<Vec<Listing>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if self.fail_auth {
            return Err(Error::Marketplace(MarketplaceError::Auth(
                "invalid_client".into(),
            )));
        }
        Ok(self.listings.get(&kind).cloned().unwrap_or_default())
    }
}
