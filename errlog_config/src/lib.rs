#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the errlog tool.
//!
//! - `Config` and its sections are deserialized from TOML; every section and
//!   field has a default, so an empty file is a valid config.
//! - `validate()` rejects values the logger cannot use (empty path, level tags
//!   that would break the `[<level>]` framing, unknown diagnostics filters).
use eyre::WrapErr;
use errlog_core::level;
use errlog_core::redirect::CaptureMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// stderr capture policy for the `[log]` section.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Capture {
    Off,
    #[default]
    Raw,
    Framed,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogCfg {
    /// Path of the log file (opened in append mode, parent must exist)
    pub file: PathBuf,
    /// Whether `errlog run` captures stderr, and how
    pub capture: Capture,
    /// Level tag for framed stderr lines
    pub capture_level: String,
    /// Level tag used by `log`/`pipe` when no --level is given
    pub default_level: String,
}

impl Default for LogCfg {
    fn default() -> Self {
        Self {
            file: PathBuf::from("errlog.log"),
            capture: Capture::Raw,
            capture_level: level::STDERR.to_string(),
            default_level: level::ERROR.to_string(),
        }
    }
}

impl LogCfg {
    /// Capture mode for the redirect layer; `None` when capture is off.
    pub fn capture_mode(&self) -> Option<CaptureMode> {
        match self.capture {
            Capture::Off => None,
            Capture::Raw => Some(CaptureMode::Raw),
            Capture::Framed => Some(CaptureMode::Framed {
                level: self.capture_level.clone(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Diagnostics {
    /// Console filter for the tool's own tracing output ("error","warn",...)
    pub level: String,
    /// Emit diagnostics as JSON lines
    pub json: bool,
    /// Optional file receiving a JSON copy of the diagnostics (never rotated)
    pub file: Option<PathBuf>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
            file: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub log: LogCfg,
    pub diagnostics: Diagnostics,
}

const DIAGNOSTIC_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse, and validate a config file.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let cfg = load_toml(&text).wrap_err_with(|| format!("parse config {}", path.display()))?;
    cfg.validate()
        .wrap_err_with(|| format!("invalid configuration in {}", path.display()))?;
    Ok(cfg)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Log
        if self.log.file.as_os_str().is_empty() {
            eyre::bail!("log.file must not be empty");
        }
        if !level::is_valid_tag(&self.log.default_level) {
            eyre::bail!(
                "log.default_level {:?} must be 1..={} chars without whitespace or brackets",
                self.log.default_level,
                level::MAX_TAG_LEN
            );
        }
        if self.log.capture == Capture::Framed && !level::is_valid_tag(&self.log.capture_level) {
            eyre::bail!(
                "log.capture_level {:?} must be 1..={} chars without whitespace or brackets",
                self.log.capture_level,
                level::MAX_TAG_LEN
            );
        }

        // Diagnostics
        let lvl = self.diagnostics.level.to_ascii_lowercase();
        if !DIAGNOSTIC_LEVELS.contains(&lvl.as_str()) {
            eyre::bail!(
                "diagnostics.level must be one of {}",
                DIAGNOSTIC_LEVELS.join("|")
            );
        }
        if let Some(file) = &self.diagnostics.file
            && file.file_name().is_none()
        {
            eyre::bail!("diagnostics.file must name a file");
        }

        Ok(())
    }
}
