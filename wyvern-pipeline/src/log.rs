//! Progress logging capability.

/// Receives one progress line per pipeline step.
pub trait Log {
    fn emit(&self, line: &str);
}

/// Prints progress lines to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutLog;

impl Log for StdoutLog {
    fn emit(&self, line: &str) {
        println!("{}", line);
    }
}

/// Discards progress lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentLog;

impl Log for SilentLog {
    fn emit(&self, _line: &str) {}
}

/// Forwards progress lines to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl Log for TracingLog {
    fn emit(&self, line: &str) {
        tracing::info!(target: "wyvern::progress", "{}", line.trim_start());
    }
}

/// The log to use for a given progress setting.
pub fn progress_log(enabled: bool) -> Box<dyn Log> {
    if enabled {
        Box::new(StdoutLog)
    } else {
        Box::new(SilentLog)
    }
}
