//! Marketplace-agnostic pricing domain: listings, observation sets, and the
//! pricing model itself.

pub mod error;
pub mod listing;
pub mod money;
pub mod observation;
pub mod pricing;
pub mod report;
pub mod strategy;

pub use error::PricingError;
pub use listing::{Listing, Shipping, ShippingOption};
pub use money::{Amount, TotalCost};
pub use observation::ObservationSet;
pub use pricing::{evaluate, evaluate_observations};
pub use report::{MarketHealth, MarketStats, PriceBand, PriceReport};
pub use strategy::Strategy;
