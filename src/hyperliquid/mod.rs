//! Hyperliquid info API: request/response shapes and the HTTP client.

pub mod client;
pub mod types;

pub use client::InfoClient;
