#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|tag: &str| {
    // An accepted tag renders as exactly one bracketed group after the timestamp.
    if errlog_core::level::is_valid_tag(tag) {
        let at = chrono::NaiveDateTime::default();
        let line = errlog_core::LogEntry::new(at, tag, "m").to_string();
        assert_eq!(line.matches('[').count(), 2);
        assert_eq!(line.matches(']').count(), 2);
    }
});
