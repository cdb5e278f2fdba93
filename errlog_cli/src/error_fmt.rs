//! Human-readable error descriptions and structured JSON error formatting.

use errlog_core::LogError;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(le) = err.downcast_ref::<LogError>() {
        return match le {
            LogError::Open { path, source } => format!(
                "What happened: Could not open log file {} ({source}).\nLikely causes: Parent directory missing, no write permission, or the path is a directory.\nHow to fix: Create the directory or pass a writable path with --file.",
                path.display()
            ),
            LogError::Disabled { path, reason } => format!(
                "What happened: Log file {} is disabled ({reason}).\nLikely causes: The file could not be opened when the logger was created.\nHow to fix: Check the path and permissions, then rerun.",
                path.display()
            ),
            LogError::Write { path, source } => format!(
                "What happened: Writing to {} failed ({source}).\nLikely causes: Disk full, quota exceeded, or the device went away.\nHow to fix: Free space or point --file at another volume.",
                path.display()
            ),
            LogError::AlreadyBound { path } => format!(
                "What happened: stderr is already captured into {}.\nLikely causes: Another capture in this process was not released.\nHow to fix: Release the earlier capture before binding again.",
                path.display()
            ),
            LogError::Redirect(e) => format!(
                "What happened: Could not rebind stderr ({e}).\nLikely causes: Descriptor limit reached or stderr closed.\nHow to fix: Rerun with --capture off, or raise the open-file limit."
            ),
            LogError::Unsupported => "What happened: stderr capture is not available on this platform.\nHow to fix: Rerun with --capture off.".to_string(),
        };
    }

    // String-based heuristics for config errors
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("invalid configuration") || lower.contains("parse config") {
        let cause = err
            .chain()
            .last()
            .map(ToString::to_string)
            .unwrap_or_default();
        return format!(
            "What happened: Configuration is invalid ({cause}).\nHow to fix: Edit the TOML config and try again.\nOriginal: {msg}"
        );
    }

    if lower.contains("read config") {
        return format!(
            "What happened: {msg}.\nLikely causes: Wrong --config path or missing read permission.\nHow to fix: Pass an existing file or omit --config to use defaults."
        );
    }

    if lower.contains("open diagnostics file") {
        let cause = err
            .chain()
            .last()
            .map(ToString::to_string)
            .unwrap_or_default();
        return format!(
            "What happened: Could not {msg} ({cause}).\nLikely causes: Parent path is not a directory or not writable.\nHow to fix: Point diagnostics.file at a writable directory or remove it."
        );
    }

    if lower.contains("invalid level tag") {
        return format!("What happened: {msg}.\nHow to fix: Use a short tag such as ERROR or WARNING.");
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Map typed log errors to stable exit codes; everything else returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<LogError>() {
        Some(LogError::Open { .. } | LogError::Disabled { .. }) => 3,
        Some(LogError::Write { .. }) => 4,
        Some(LogError::AlreadyBound { .. } | LogError::Redirect(_) | LogError::Unsupported) => 5,
        None => 1,
    }
}

pub fn error_reason_name(err: &eyre::Report) -> &'static str {
    match err.downcast_ref::<LogError>() {
        Some(LogError::Open { .. }) => "Open",
        Some(LogError::Disabled { .. }) => "Disabled",
        Some(LogError::Write { .. }) => "Write",
        Some(LogError::AlreadyBound { .. }) => "AlreadyBound",
        Some(LogError::Redirect(_)) => "Redirect",
        Some(LogError::Unsupported) => "Unsupported",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    serde_json::json!({
        "reason": error_reason_name(err),
        "code": exit_code_for_error(err),
        "message": humanize(err),
    })
    .to_string()
}
