//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`listing`] - Builders for listings and price sets.
//! - [`llm`] - Mock [`Llm`](crate::port::Llm) implementations: `MockLlm`, `FailingLlm`.
//! - [`marketplace`] - Scripted [`Marketplace`](crate::port::Marketplace).

pub mod listing;
pub mod llm;
pub mod marketplace;
