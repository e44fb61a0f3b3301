//! Process-wide logging setup shared by the binaries and test harnesses.

pub mod tracing;

pub use crate::tracing::{LogFormat, LogSettings, ParseLogFormatError};

/// Initialize logging with the default settings (JSON, `info`).
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    tracing::init(&LogSettings::default());
}
