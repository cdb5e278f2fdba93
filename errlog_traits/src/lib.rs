pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

/// Anything that can append a leveled line to a log.
///
/// Level tags are free-form ("ERROR", "WARNING", ...); implementations never
/// filter on them.
pub trait Log {
    fn log(&self, level: &str, message: &str);

    fn error(&self, message: &str) {
        self.log("ERROR", message);
    }

    fn warning(&self, message: &str) {
        self.log("WARNING", message);
    }

    fn info(&self, message: &str) {
        self.log("INFO", message);
    }

    fn debug(&self, message: &str) {
        self.log("DEBUG", message);
    }

    /// Log a caught error's message at `ERROR`. Only the top-level message is kept.
    fn report(&self, err: &dyn std::error::Error) {
        self.log("ERROR", &err.to_string());
    }
}

impl<L: Log + ?Sized> Log for &L {
    fn log(&self, level: &str, message: &str) {
        (**self).log(level, message);
    }
}
