//! Tracing/logging setup shared by the binaries.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize process-wide logging with the given format.
///
/// `RUST_LOG` overrides `default_filter`. Safe to call multiple times; subsequent
/// calls are no-ops.
pub fn init(format: LogFormat, default_filter: &str) {
    tracing::init(format, default_filter);
}
