//! pricescout - resale price recommendations from marketplace listings.
//!
//! Given the competing (active) listings and recent sales for an item,
//! recommends a total landed price under a chosen strategy, with a sell
//! probability and a market-health label.
//!
//! # Architecture
//!
//! - **`domain`** - Listings, totals, statistics, and the pricing model.
//!   Pure and synchronous.
//! - **`port`** - Traits for the marketplace and LLM collaborators
//! - **`adapter`** - eBay Browse API and OpenAI-compatible clients, and
//!   the command line
//! - **`application`** - Relevance filtering and the appraisal flow
//! - **`app`** - Configuration and logging setup
//!
//! # Example
//!
//! ```
//! use pricescout::domain::{evaluate, Listing, Strategy};
//! use rust_decimal_macros::dec;
//!
//! let listings = |prices: [i64; 5]| -> Vec<Listing> {
//!     prices.into_iter().map(|p| Listing::new(p.into())).collect()
//! };
//! let active = listings([24, 26, 27, 29, 31]);
//! let sold = listings([20, 25, 30, 22, 28]);
//!
//! let report = evaluate(&active, &sold, Strategy::MaxProfit).unwrap();
//! assert_eq!(report.recommended_price, dec!(25));
//! ```

pub mod adapter;
pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
