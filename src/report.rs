//! Error reporting collaborator.
//!
//! Recoverable errors (a failed app traversal, an unparseable file, a broken
//! function) are forwarded to an [`ErrorSink`] instead of aborting the run.
//! The sink is injected into the generation entry point so callers can route
//! reports to their own error log.

use log::error;

/// Records one recoverable error with a human-readable title and a full
/// diagnostic payload.
pub trait ErrorSink {
    fn record(&self, title: &str, detail: &str);
}

/// Default sink that forwards reports to the `log` facade.
pub struct LogSink;

impl ErrorSink for LogSink {
    fn record(&self, title: &str, detail: &str) {
        error!("{}: {}", title, detail);
    }
}
