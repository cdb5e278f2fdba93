#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing and validation may reject input but must never panic.
    if let Ok(cfg) = errlog_config::load_toml(data) {
        if cfg.validate().is_ok() {
            let _ = cfg.log.capture_mode();
        }
    }
});
