//! Tracing and logging setup shared by every binary embedding the engine.

/// Initialize process-wide logging with the default configuration
/// (`RUST_LOG`, falling back to `info`, JSON lines).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&LogConfig::default());
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogConfig, init as init_with};
