//! CLI module graph.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod evaluate;
pub mod output;
pub mod price;
pub mod report;
pub mod strategy;
