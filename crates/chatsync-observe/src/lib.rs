//! Observability setup for chatsync: structured logging with optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
