//! Observability setup for supportdesk: structured logging via `tracing`
//! and optional OpenTelemetry span export.

pub mod tracing_setup;
