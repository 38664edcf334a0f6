//! Observability setup shared by the Scribe binaries.

pub mod tracing_setup;
