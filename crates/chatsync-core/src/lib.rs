//! Session cache, synchronization manager and gateway port for chatsync.
//!
//! This crate defines the `ChatGateway` port that the infrastructure layer
//! implements, the route table every gateway call is addressed through, and
//! the `SessionManager` that owns the client-side session cache. It depends
//! only on `chatsync-types` -- never on `chatsync-infra` or any HTTP crate.

pub mod gateway;
pub mod session;
