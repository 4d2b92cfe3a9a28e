//! Shared domain types for chatsync.
//!
//! This crate contains the types every other layer speaks: sessions,
//! messages, ratings, debug logs, directory records, the error taxonomy and
//! the client configuration.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod directory;
pub mod error;
