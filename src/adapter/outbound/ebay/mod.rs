//! eBay marketplace adapter.
//!
//! - [`auth`] - application credentials and the expiring access token
//! - [`client`] - Browse API search implementing [`Marketplace`](crate::port::Marketplace)
//! - [`dto`] - response types

pub mod auth;
pub mod client;
pub mod dto;

pub use auth::{AccessToken, Credentials};
pub use client::EbayClient;
