//! Remote chat gateway abstractions.
//!
//! `port` holds the `ChatGateway` trait the infrastructure layer implements;
//! `route` holds the closed set of gateway routes and their transport methods;
//! `box_gateway` erases the adapter type for runtime selection.

pub mod box_gateway;
pub mod port;
pub mod route;
