//! Infrastructure layer for chatsync.
//!
//! Contains the HTTP implementation of the `ChatGateway` port defined in
//! `chatsync-core`, and the loader for the client configuration file.

pub mod config;
pub mod gateway;
