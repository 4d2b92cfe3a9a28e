//! Client-side session cache and the manager that keeps it in sync.
//!
//! `cache` is the plain ordered data structure; `manager` wraps it with the
//! locking and gateway orchestration every public operation goes through.

pub mod cache;
pub mod manager;
