//! File-backed append logger.
//!
//! A `Logger` owns one append-mode handle for its lifetime. Opening never
//! fails from the caller's point of view: on error the logger is returned in
//! the disabled state and every later `log()` is a silent no-op.

use crate::entry::LogEntry;
use crate::error::{LogError, Result};
use errlog_traits::{Clock, Log, SystemClock};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Outcome of opening the log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogStatus {
    Active,
    Disabled { reason: String },
}

impl LogStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, LogStatus::Active)
    }
}

#[derive(Debug)]
pub struct Logger<C = SystemClock> {
    path: PathBuf,
    handle: Option<File>,
    status: LogStatus,
    clock: C,
    failed_writes: AtomicU64,
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl Logger<SystemClock> {
    /// Open `path` for appending. Never fails; check [`Logger::status`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_clock(path, SystemClock::new())
    }

    /// Strict variant of [`Logger::new`] that returns the open error.
    pub fn try_new(path: impl AsRef<Path>) -> Result<Self> {
        Self::try_with_clock(path, SystemClock::new())
    }
}

impl<C: Clock> Logger<C> {
    pub fn with_clock(path: impl AsRef<Path>, clock: C) -> Self {
        let path = path.as_ref().to_path_buf();
        match open_append(&path) {
            Ok(file) => {
                tracing::debug!(path = %path.display(), "log file opened");
                Self::active(path, file, clock)
            }
            Err(source) => {
                let err = LogError::Open {
                    path: path.clone(),
                    source,
                };
                // One-shot diagnostic; the logger stays quiet afterwards.
                let _ = writeln!(std::io::stderr(), "errlog: {err}");
                tracing::error!(path = %path.display(), error = %err, "log file disabled");
                Self {
                    path,
                    handle: None,
                    status: LogStatus::Disabled {
                        reason: err.to_string(),
                    },
                    clock,
                    failed_writes: AtomicU64::new(0),
                }
            }
        }
    }

    pub fn try_with_clock(path: impl AsRef<Path>, clock: C) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path).map_err(|source| LogError::Open {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "log file opened");
        Ok(Self::active(path, file, clock))
    }

    fn active(path: PathBuf, file: File, clock: C) -> Self {
        Self {
            path,
            handle: Some(file),
            status: LogStatus::Active,
            clock,
            failed_writes: AtomicU64::new(0),
        }
    }

    /// Append one entry. Disabled loggers drop it silently; write errors are
    /// counted in [`Logger::failed_writes`] and otherwise ignored.
    pub fn log(&self, level: &str, message: &str) {
        if let Err(e) = self.try_log(level, message) {
            let prior = self.failed_writes.fetch_add(1, Ordering::Relaxed);
            if prior == 0 {
                tracing::warn!(error = %e, "log write failed; further failures are counted only");
            }
        }
    }

    /// Append one entry and report write errors. A disabled logger returns `Ok(())`.
    pub fn try_log(&self, level: &str, message: &str) -> Result<()> {
        let Some(file) = self.handle.as_ref() else {
            return Ok(());
        };
        let line = LogEntry::new(self.clock.now(), level, message).to_line();
        // Single write per entry so appends from other handles on the same
        // file (captured stderr) never split a line.
        let mut out: &File = file;
        out.write_all(line.as_bytes())
            .map_err(|source| LogError::Write {
                path: self.path.clone(),
                source,
            })
    }

    /// Second logger on the same open file description.
    pub fn try_clone(&self) -> Result<Self>
    where
        C: Clone,
    {
        let file = self.file()?.try_clone().map_err(|source| LogError::Open {
            path: self.path.clone(),
            source,
        })?;
        Ok(Self::active(self.path.clone(), file, self.clock.clone()))
    }
}

impl<C> Logger<C> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn status(&self) -> &LogStatus {
        &self.status
    }

    pub fn is_enabled(&self) -> bool {
        self.handle.is_some()
    }

    /// Number of entries lost to write errors so far.
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    /// Release the file handle now instead of at scope end.
    pub fn close(self) {
        drop(self);
    }

    pub(crate) fn file(&self) -> Result<&File> {
        self.handle.as_ref().ok_or_else(|| self.disabled_error())
    }

    /// `Err(LogError::Disabled)` unless the logger holds an open handle.
    pub fn ensure_enabled(&self) -> Result<()> {
        self.file().map(|_| ())
    }

    fn disabled_error(&self) -> LogError {
        let reason = match &self.status {
            LogStatus::Disabled { reason } => reason.clone(),
            LogStatus::Active => "handle released".to_string(),
        };
        LogError::Disabled {
            path: self.path.clone(),
            reason,
        }
    }
}

impl<C> Drop for Logger<C> {
    fn drop(&mut self) {
        if self.handle.take().is_some() {
            tracing::trace!(path = %self.path.display(), "log file closed");
        }
    }
}

impl<C: Clock> Log for Logger<C> {
    fn log(&self, level: &str, message: &str) {
        Logger::log(self, level, message);
    }
}
