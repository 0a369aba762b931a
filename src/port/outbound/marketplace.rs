//! Marketplace port: where listings come from.

use std::fmt;

use async_trait::async_trait;

use crate::domain::Listing;
use crate::error::Result;

/// Which side of the market to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingKind {
    /// Currently listed competing items.
    Active,
    /// Recently completed sales.
    Sold,
}

impl ListingKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text product query.
    pub text: String,
}

impl SearchQuery {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Source of raw listings.
///
/// Implementations may be called concurrently for both listing kinds.
/// An empty result is valid and must not be turned into an error.
#[async_trait]
pub trait Marketplace: Send + Sync {
    /// Marketplace name for logging.
    fn name(&self) -> &'static str;

    /// Search listings of the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error on authentication or transport failure.
    async fn search(&self, query: &SearchQuery, kind: ListingKind) -> Result<Vec<Listing>>;
}
