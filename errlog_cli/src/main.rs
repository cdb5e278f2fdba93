mod cli;
mod commands;
mod diag;
mod error_fmt;

use clap::Parser;
use cli::{Cli, Commands, JSON_MODE};
use errlog_config::Config;
use error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let json_flag = cli.json;

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if JSON_MODE.get().copied().unwrap_or(json_flag) {
                eprintln!("{}", format_error_json(&e));
            } else {
                eprintln!("{}", humanize(&e));
            }
            exit_code_for_error(&e)
        }
    };
    diag::flush();
    std::process::exit(code);
}

fn run(cli: Cli) -> eyre::Result<i32> {
    let mut cfg = match &cli.config {
        Some(path) => errlog_config::load_file(path)?,
        None => Config::default(),
    };
    let json = cli.json || cfg.diagnostics.json;
    let _ = JSON_MODE.set(json);
    let diag_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&cfg.diagnostics.level);
    diag::init(diag_level, json, cfg.diagnostics.file.as_deref())?;

    let path = cli.file.unwrap_or(cfg.log.file.clone());
    tracing::debug!(path = %path.display(), "log file resolved");

    match cli.cmd {
        Commands::Log { level, message } => commands::log(
            &path,
            level.as_deref().unwrap_or(&cfg.log.default_level),
            &message.join(" "),
        ),
        Commands::Pipe { level } => commands::pipe(
            &path,
            level.as_deref().unwrap_or(&cfg.log.default_level),
        ),
        Commands::Run {
            capture,
            capture_level,
            command,
        } => {
            if let Some(tag) = capture_level {
                cfg.log.capture_level = tag;
            }
            let mode = match capture {
                Some(arg) => arg.into_mode(&cfg.log.capture_level),
                None => cfg.log.capture_mode(),
            };
            commands::run(&path, mode, &command)
        }
        Commands::Check => Ok(commands::check(&path, json)),
    }
}
