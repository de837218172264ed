//! Observability setup for Conseil: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
