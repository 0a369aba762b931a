//! Outbound adapters (driven side).

pub mod ebay;
pub mod llm;
