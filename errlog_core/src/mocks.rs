//! Test and helper mocks for errlog_core

use errlog_traits::Log;
use std::sync::Mutex;

/// A log that keeps `(level, message)` pairs in memory instead of writing a file.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<(String, String)>>,
}

impl MemoryLog {
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, m)| m).collect()
    }
}

impl Log for MemoryLog {
    fn log(&self, level: &str, message: &str) {
        if let Ok(mut g) = self.entries.lock() {
            g.push((level.to_string(), message.to_string()));
        }
    }
}
