//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │   Application (Scout)    │
//!                 │  Domain (pricing model)  │
//!                 └────────────┬─────────────┘
//!                 ┌────────────┴─────────────┐
//!                 ▼                          ▼
//!          ┌─────────────┐            ┌─────────────┐
//!          │ Marketplace │            │     Llm     │
//!          │  (eBay)     │            │   (Groq)    │
//!          └─────────────┘            └─────────────┘
//! ```

pub mod outbound;

pub use outbound::llm::Llm;
pub use outbound::marketplace::{ListingKind, Marketplace, SearchQuery};
