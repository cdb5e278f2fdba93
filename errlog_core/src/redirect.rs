//! Process-wide capture of stderr into a log file.
//!
//! There is at most one binding per process. `bind` points file descriptor 2
//! at the logger's file (raw) or at a pipe drained by a forwarder thread
//! (framed); `unbind` puts the original stderr back. Child processes spawned
//! while a binding is active inherit the captured descriptor.
//!
//! Rust's test harness captures `eprintln!` in-process, so only writes that
//! reach fd 2 directly (`std::io::stderr().write_all`, C libraries, children)
//! are affected inside tests.

use crate::error::{LogError, Result};
use crate::level;
use crate::logger::Logger;
use errlog_traits::Clock;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// How captured stderr text is written to the log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureMode {
    /// Bytes land in the file verbatim, without timestamp or level.
    Raw,
    /// Each line is written as a regular entry tagged with `level`.
    Framed { level: String },
}

impl CaptureMode {
    /// Framed capture with the default `STDERR` tag.
    pub fn framed() -> Self {
        CaptureMode::Framed {
            level: level::STDERR.to_string(),
        }
    }
}

struct Binding {
    target: PathBuf,
    #[cfg(unix)]
    saved: std::os::fd::OwnedFd,
    forwarder: Option<std::thread::JoinHandle<()>>,
}

static BINDING: Mutex<Option<Binding>> = Mutex::new(None);

fn slot() -> MutexGuard<'static, Option<Binding>> {
    BINDING.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Whether stderr is currently captured.
pub fn is_bound() -> bool {
    slot().is_some()
}

/// Path of the file stderr is captured into, if any.
pub fn bound_target() -> Option<PathBuf> {
    slot().as_ref().map(|b| b.target.clone())
}

/// Capture stderr into `logger`'s file until [`unbind`] is called.
pub fn bind<C>(logger: &Logger<C>, mode: CaptureMode) -> Result<()>
where
    C: Clock + Clone + Send + 'static,
{
    let mut slot = slot();
    if let Some(existing) = slot.as_ref() {
        return Err(LogError::AlreadyBound {
            path: existing.target.clone(),
        });
    }
    let file = logger.file()?;
    *slot = Some(sys::bind(logger, file, mode)?);
    Ok(())
}

/// Restore the original stderr. Returns `false` when nothing was bound.
///
/// In framed mode this waits for the forwarder to drain the pipe, which ends
/// once every writer (including inherited copies held by children) is closed.
pub fn unbind() -> Result<bool> {
    let mut slot = slot();
    let Some(binding) = slot.take() else {
        return Ok(false);
    };
    match sys::restore(&binding) {
        Ok(()) => {}
        Err(e) => {
            *slot = Some(binding);
            return Err(e.into());
        }
    }
    drop(slot);
    finish(binding);
    Ok(true)
}

fn finish(binding: Binding) {
    let Binding {
        target, forwarder, ..
    } = binding;
    if let Some(handle) = forwarder
        && handle.join().is_err()
    {
        tracing::warn!(target = %target.display(), "stderr forwarder panicked");
    }
    tracing::debug!(target = %target.display(), "stderr restored");
}

/// Scoped stderr capture; restores stderr on drop.
#[must_use = "dropping the guard restores stderr immediately"]
#[derive(Debug)]
pub struct StderrCapture {
    target: PathBuf,
    armed: bool,
}

impl StderrCapture {
    pub fn bind<C>(logger: &Logger<C>, mode: CaptureMode) -> Result<Self>
    where
        C: Clock + Clone + Send + 'static,
    {
        bind(logger, mode)?;
        Ok(Self {
            target: logger.path().to_path_buf(),
            armed: true,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Unbind now and report failures instead of logging them.
    pub fn release(mut self) -> Result<bool> {
        self.armed = false;
        unbind()
    }

    /// Keep stderr captured for the rest of the process.
    pub fn persist(mut self) {
        self.armed = false;
    }
}

impl Drop for StderrCapture {
    fn drop(&mut self) {
        if self.armed
            && let Err(e) = unbind()
        {
            tracing::warn!(error = %e, "failed to restore stderr");
        }
    }
}

#[cfg(unix)]
mod sys {
    use super::{Binding, CaptureMode};
    use crate::error::Result;
    use crate::logger::Logger;
    use errlog_traits::Clock;
    use std::fs::File;
    use std::io::{self, BufRead, BufReader, Read, Write};
    use std::os::fd::{AsFd, AsRawFd, BorrowedFd};

    fn point_stderr_at(fd: BorrowedFd<'_>) -> io::Result<()> {
        let _ = io::stderr().flush();
        // SAFETY: `fd` is a live descriptor for the duration of the call and
        // dup2 only replaces descriptor 2.
        let rc = unsafe { libc::dup2(fd.as_raw_fd(), libc::STDERR_FILENO) };
        if rc == -1 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }

    pub(super) fn bind<C>(logger: &Logger<C>, file: &File, mode: CaptureMode) -> Result<Binding>
    where
        C: Clock + Clone + Send + 'static,
    {
        let saved = io::stderr().as_fd().try_clone_to_owned()?;
        let target = logger.path().to_path_buf();
        tracing::debug!(target = %target.display(), ?mode, "capturing stderr");
        match mode {
            CaptureMode::Raw => {
                point_stderr_at(file.as_fd())?;
                Ok(Binding {
                    target,
                    saved,
                    forwarder: None,
                })
            }
            CaptureMode::Framed { level } => {
                let forward = logger.try_clone()?;
                let (reader, writer) = io::pipe()?;
                let handle = std::thread::Builder::new()
                    .name("errlog-stderr".into())
                    .spawn(move || forward_lines(reader, &forward, &level))?;
                // The forwarder sees EOF once fd 2 and every inherited copy
                // of the write end are closed.
                let pointed = point_stderr_at(writer.as_fd());
                drop(writer);
                if let Err(e) = pointed {
                    let _ = handle.join();
                    return Err(e.into());
                }
                Ok(Binding {
                    target,
                    saved,
                    forwarder: Some(handle),
                })
            }
        }
    }

    pub(super) fn restore(binding: &Binding) -> io::Result<()> {
        point_stderr_at(binding.saved.as_fd())
    }

    fn forward_lines<R: Read, C: Clock>(reader: R, logger: &Logger<C>, level: &str) {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::with_capacity(256);
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    while matches!(buf.last(), Some(b'\n' | b'\r')) {
                        buf.pop();
                    }
                    logger.log(level, &String::from_utf8_lossy(&buf));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::forward_lines;
        use crate::logger::Logger;
        use errlog_traits::FixedClock;
        use std::fs;

        #[test]
        fn forwarder_frames_each_line() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("fwd.log");
            let clock = FixedClock::parse("2025-03-06 12:34:56").unwrap();
            let logger = Logger::with_clock(&path, clock);
            let input: &[u8] = b"first\r\nsecond\nno newline at end";
            forward_lines(input, &logger, "STDERR");
            drop(logger);
            assert_eq!(
                fs::read_to_string(&path).unwrap(),
                "[2025-03-06 12:34:56] [STDERR] first\n\
                 [2025-03-06 12:34:56] [STDERR] second\n\
                 [2025-03-06 12:34:56] [STDERR] no newline at end\n"
            );
        }

        #[test]
        fn forwarder_replaces_invalid_utf8() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("lossy.log");
            let clock = FixedClock::parse("2025-03-06 12:34:56").unwrap();
            let logger = Logger::with_clock(&path, clock);
            let input: &[u8] = b"bad \xff byte\n";
            forward_lines(input, &logger, "STDERR");
            drop(logger);
            let text = fs::read_to_string(&path).unwrap();
            assert!(text.ends_with("[STDERR] bad \u{fffd} byte\n"), "{text}");
        }
    }
}

#[cfg(not(unix))]
mod sys {
    use super::{Binding, CaptureMode};
    use crate::error::{LogError, Result};
    use crate::logger::Logger;
    use std::fs::File;

    pub(super) fn bind<C>(_logger: &Logger<C>, _file: &File, _mode: CaptureMode) -> Result<Binding> {
        Err(LogError::Unsupported)
    }

    pub(super) fn restore(_binding: &Binding) -> std::io::Result<()> {
        Ok(())
    }
}
