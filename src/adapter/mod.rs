//! Implementations of ports (hexagonal adapters).
//!
//! - `inbound`: the command line, which drives the application
//! - `outbound`: the eBay and LLM clients the application drives

pub mod inbound;
pub mod outbound;
