//! Application services: relevance filtering and the appraisal flow.

pub mod filter;
pub mod scout;

pub use filter::RelevanceFilter;
pub use scout::{Appraisal, Scout};
