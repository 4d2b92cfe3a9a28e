//! Remote chat gateway adapters.

pub mod client;

pub use client::HttpChatGateway;
