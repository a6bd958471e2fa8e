//! Tracing/logging setup shared by binaries.

use posline_config::LoggingConfig;

/// Tracing configuration (filters, output format).
pub mod tracing;

/// Initialize process-wide logging with default settings.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&LoggingConfig::default());
}

/// Initialize process-wide logging from explicit settings.
pub fn init_with(config: &LoggingConfig) {
    tracing::init(config);
}
