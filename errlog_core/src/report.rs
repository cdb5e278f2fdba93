//! Bridging caught errors into a log.
//!
//! Only the error's `Display` text is kept; sources and backtraces are not
//! walked.

use crate::level;
use errlog_traits::Log;
use std::fmt::Display;

/// Log the error side of a `Result` and hand the result back unchanged.
pub trait LogResultExt {
    /// Log an `Err` at `ERROR`.
    fn log_err<L: Log + ?Sized>(self, log: &L) -> Self;

    /// Log an `Err` at a chosen level tag.
    fn log_err_at<L: Log + ?Sized>(self, log: &L, level: &str) -> Self;
}

impl<T, E: Display> LogResultExt for Result<T, E> {
    fn log_err<L: Log + ?Sized>(self, log: &L) -> Self {
        self.log_err_at(log, level::ERROR)
    }

    fn log_err_at<L: Log + ?Sized>(self, log: &L, level: &str) -> Self {
        if let Err(e) = &self {
            log.log(level, &e.to_string());
        }
        self
    }
}
