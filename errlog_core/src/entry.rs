//! Rendering of a single log line.

use chrono::NaiveDateTime;
use std::fmt;

/// strftime pattern for the entry timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One log line: `[<timestamp>] [<level>] <message>`.
///
/// The message is written verbatim; embedded newlines are not escaped.
#[derive(Debug, Clone, Copy)]
pub struct LogEntry<'a> {
    pub timestamp: NaiveDateTime,
    pub level: &'a str,
    pub message: &'a str,
}

impl<'a> LogEntry<'a> {
    pub fn new(timestamp: NaiveDateTime, level: &'a str, message: &'a str) -> Self {
        Self {
            timestamp,
            level,
            message,
        }
    }

    /// The full line including the trailing `\n`, ready for a single write.
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.level,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn renders_bracketed_line() {
        let e = LogEntry::new(at("2025-03-06 12:34:56"), "ERROR", "disk full");
        assert_eq!(e.to_string(), "[2025-03-06 12:34:56] [ERROR] disk full");
        assert_eq!(e.to_line(), "[2025-03-06 12:34:56] [ERROR] disk full\n");
    }

    #[test]
    fn pads_single_digit_fields() {
        let e = LogEntry::new(at("2024-01-02 03:04:05"), "INFO", "x");
        assert!(e.to_string().starts_with("[2024-01-02 03:04:05]"));
    }

    #[test]
    fn empty_message_keeps_separator() {
        let e = LogEntry::new(at("2025-03-06 12:34:56"), "WARNING", "");
        assert_eq!(e.to_string(), "[2025-03-06 12:34:56] [WARNING] ");
    }
}
