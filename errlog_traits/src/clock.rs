use chrono::{Local, NaiveDateTime};
use std::sync::{Arc, Mutex};

/// Wall-clock abstraction used to stamp log entries.
///
/// - now(): returns the current local civil time (no zone attached)
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Default clock backed by the system local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Deterministic clock whose time is set manually.
///
/// Clones share the same instant, so a test can keep one handle and move the
/// other into a logger.
#[derive(Debug, Clone)]
pub struct FixedClock {
    at: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            at: Arc::new(Mutex::new(at)),
        }
    }

    /// Parse `YYYY-MM-DD HH:MM:SS`; `None` when the text does not match.
    pub fn parse(text: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(Self::new)
    }

    /// Move the clock to an absolute instant.
    pub fn set(&self, at: NaiveDateTime) {
        if let Ok(mut cur) = self.at.lock() {
            *cur = at;
        }
    }

    /// Advance the clock by `d`, saturating at the representable maximum.
    pub fn advance(&self, d: chrono::TimeDelta) {
        if let Ok(mut cur) = self.at.lock() {
            *cur = cur.checked_add_signed(d).unwrap_or(NaiveDateTime::MAX);
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
            .lock()
            .map(|g| *g)
            .unwrap_or(NaiveDateTime::UNIX_EPOCH)
    }
}
