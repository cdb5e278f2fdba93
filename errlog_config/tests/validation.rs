use errlog_config::{Capture, load_file, load_toml};
use rstest::rstest;
use std::fs;
use tempfile::tempdir;

#[test]
fn accepts_full_config() {
    let toml = r#"
[log]
file = "/var/log/app/errors.log"
capture = "framed"
capture_level = "STDERR"
default_level = "WARNING"

[diagnostics]
level = "debug"
json = true
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.log.capture, Capture::Framed);
    assert_eq!(cfg.log.default_level, "WARNING");
    assert!(cfg.diagnostics.json);
}

#[rstest]
#[case("[log]\nfile = \"\"", "log.file must not be empty")]
#[case("[log]\ndefault_level = \"TWO WORDS\"", "log.default_level")]
#[case("[log]\ndefault_level = \"\"", "log.default_level")]
#[case(
    "[log]\ncapture = \"framed\"\ncapture_level = \"[x]\"",
    "log.capture_level"
)]
#[case("[diagnostics]\nlevel = \"loud\"", "diagnostics.level must be one of")]
#[case("[diagnostics]\nfile = \"/\"", "diagnostics.file must name a file")]
fn rejects_invalid_values(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject");
    assert!(format!("{err}").contains(needle), "{err}");
}

#[test]
fn bad_capture_tag_is_ignored_for_raw_capture() {
    let cfg = load_toml("[log]\ncapture = \"raw\"\ncapture_level = \"\"").unwrap();
    cfg.validate().expect("capture_level only matters for framed capture");
}

#[test]
fn unknown_capture_mode_fails_to_parse() {
    assert!(load_toml("[log]\ncapture = \"sometimes\"").is_err());
}

#[test]
fn load_file_wraps_errors_with_path() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = load_file(&missing).unwrap_err();
    assert!(format!("{err}").contains("read config"));

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "[diagnostics]\nlevel = \"loud\"\n").unwrap();
    let err = load_file(&bad).unwrap_err();
    assert!(format!("{err}").contains("invalid configuration"));
    assert!(format!("{err:#}").contains("diagnostics.level"));

    let good = dir.path().join("good.toml");
    fs::write(&good, "[log]\nfile = \"x.log\"\n").unwrap();
    assert_eq!(load_file(&good).unwrap().log.file.to_str(), Some("x.log"));
}
