//! Subcommand bodies. Each returns the process exit code on success.

use errlog_core::redirect::{CaptureMode, StderrCapture};
use errlog_core::{LogStatus, Logger, level};
use eyre::WrapErr;
use std::io::BufRead;
use std::path::Path;
use std::process::{Command, ExitStatus};

fn checked_tag(tag: &str) -> eyre::Result<&str> {
    if !level::is_valid_tag(tag) {
        eyre::bail!(
            "invalid level tag {tag:?}: use 1..={} chars without whitespace or brackets",
            level::MAX_TAG_LEN
        );
    }
    Ok(tag)
}

pub fn log(path: &Path, tag: &str, message: &str) -> eyre::Result<i32> {
    let tag = checked_tag(tag)?;
    let logger = Logger::try_new(path)?;
    logger.try_log(tag, message)?;
    tracing::debug!(path = %path.display(), level = tag, "entry appended");
    Ok(0)
}

pub fn pipe(path: &Path, tag: &str) -> eyre::Result<i32> {
    let tag = checked_tag(tag)?;
    let logger = Logger::try_new(path)?;
    let mut input = std::io::stdin().lock();
    let mut buf = Vec::with_capacity(256);
    let mut entries = 0u64;
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).wrap_err("read stdin")? == 0 {
            break;
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        logger.try_log(tag, &String::from_utf8_lossy(&buf))?;
        entries += 1;
    }
    tracing::info!(path = %path.display(), entries, "pipe finished");
    Ok(0)
}

/// Exit code a shell would report for `status`.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return 128 + sig;
        }
    }
    1
}

pub fn run(path: &Path, mode: Option<CaptureMode>, argv: &[String]) -> eyre::Result<i32> {
    let Some((program, args)) = argv.split_first() else {
        eyre::bail!("run needs a command after `--`");
    };
    if let Some(CaptureMode::Framed { level }) = &mode {
        checked_tag(level)?;
    }
    let logger = Logger::try_new(path)?;
    let shown = argv.join(" ");

    let capture = match mode {
        Some(m) => Some(StderrCapture::bind(&logger, m)?),
        None => None,
    };
    logger.try_log(level::INFO, &format!("running `{shown}`"))?;
    let spawned = Command::new(program).args(args).status();
    // Restore stderr first so the exit line follows everything the child wrote.
    if let Some(capture) = capture {
        capture.release()?;
    }

    let status = match spawned {
        Ok(s) => s,
        Err(e) => {
            logger.try_log(level::ERROR, &format!("`{shown}` failed to start: {e}"))?;
            return Err(e).wrap_err_with(|| format!("spawn `{program}`"));
        }
    };
    let tag = if status.success() {
        level::INFO
    } else {
        level::ERROR
    };
    logger.try_log(tag, &format!("`{shown}` finished with {status}"))?;
    tracing::info!(command = %shown, %status, "run finished");
    Ok(exit_code(status))
}

pub fn check(path: &Path, json: bool) -> i32 {
    let logger = Logger::new(path);
    let shown = path.display().to_string();
    match (logger.status(), json) {
        (LogStatus::Active, false) => println!("active: {shown}"),
        (LogStatus::Disabled { reason }, false) => println!("disabled: {reason}"),
        (LogStatus::Active, true) => {
            println!("{}", serde_json::json!({ "path": shown, "status": "active" }));
        }
        (LogStatus::Disabled { reason }, true) => println!(
            "{}",
            serde_json::json!({ "path": shown, "status": "disabled", "reason": reason })
        ),
    }
    if logger.is_enabled() { 0 } else { 1 }
}
