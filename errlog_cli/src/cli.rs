//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use errlog_core::redirect::CaptureMode;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Keeps the non-blocking diagnostics writer alive; taken and dropped on exit to flush.
pub static FILE_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> =
    Mutex::new(None);
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(
    name = "errlog",
    version,
    about = "Append timestamped, leveled lines to a log file"
)]
pub struct Cli {
    /// Path to config TOML (optional; defaults apply without it)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log file to append to (overrides log.file)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Emit diagnostics and errors as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console diagnostics level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// stderr capture mode for `run`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CaptureArg {
    /// Do not capture stderr
    Off,
    /// Copy stderr bytes into the log file verbatim
    Raw,
    /// Wrap each stderr line as a regular entry
    Framed,
}

impl CaptureArg {
    pub fn into_mode(self, framed_level: &str) -> Option<CaptureMode> {
        match self {
            CaptureArg::Off => None,
            CaptureArg::Raw => Some(CaptureMode::Raw),
            CaptureArg::Framed => Some(CaptureMode::Framed {
                level: framed_level.to_string(),
            }),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append one entry
    Log {
        /// Level tag (defaults to log.default_level)
        #[arg(long, value_name = "TAG")]
        level: Option<String>,
        /// Message text; several words are joined with single spaces
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Append one entry per line read from stdin
    Pipe {
        /// Level tag (defaults to log.default_level)
        #[arg(long, value_name = "TAG")]
        level: Option<String>,
    },
    /// Run a command with its stderr captured into the log file
    Run {
        /// Capture mode (defaults to log.capture)
        #[arg(long, value_enum, value_name = "MODE")]
        capture: Option<CaptureArg>,
        /// Level tag for framed capture (defaults to log.capture_level)
        #[arg(long, value_name = "TAG")]
        capture_level: Option<String>,
        /// Program and arguments, after `--`
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        command: Vec<String>,
    },
    /// Report whether the log file can be opened for appending
    Check,
}
