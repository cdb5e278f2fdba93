#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! File-backed error/event logging.
//!
//! ## Architecture
//!
//! - **Logger**: owns one append-mode file handle; `log(level, message)`
//!   writes `[YYYY-MM-DD HH:MM:SS] [LEVEL] message` (`logger`, `entry`)
//! - **Capture**: process-wide stderr binding, raw or framed (`redirect`)
//! - **Bridging**: logging caught errors by message (`report`)
//!
//! Opening never fails from the caller's side: a logger whose file could not
//! be opened is returned disabled and drops every entry.

pub mod entry;
pub mod error;
pub mod level;
pub mod logger;
pub mod mocks;
pub mod redirect;
pub mod report;

pub use entry::{LogEntry, TIMESTAMP_FORMAT};
pub use error::{LogError, Result};
pub use errlog_traits::{Clock, FixedClock, Log, SystemClock};
pub use logger::{LogStatus, Logger};
pub use redirect::{CaptureMode, StderrCapture};
pub use report::LogResultExt;
