use crate::level::LogLevel;

/// Source-location metadata captured in the producer thread, not the
/// consumer — a log call made from thread A must report thread A's file,
/// line and thread id even though a different thread formats it.
#[derive(Debug, Clone)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

/// One deferred log record (spec §3 `LogEvent`). Lives only inside its
/// ring-buffer slot: owned by the producer between claim and publish,
/// read-only for the consumer after that.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
    pub location: SourceLocation,
    pub timestamp: std::time::SystemTime,
    pub thread_id: u64,
    pub process_id: u32,
    pub shutdown_signal: bool,
}

impl LogEvent {
    /// `function` must come from the caller's own stack frame — typically
    /// `demiplane_gears::function_name!()` expanded at the log call site,
    /// since nothing called from here can recover it after the fact.
    #[track_caller]
    pub fn new(level: LogLevel, message: String, function: &'static str) -> Self {
        let loc = std::panic::Location::caller();
        LogEvent {
            level,
            message,
            location: SourceLocation {
                file: loc.file(),
                line: loc.line(),
                function,
            },
            timestamp: std::time::SystemTime::now(),
            thread_id: thread_id_u64(),
            process_id: std::process::id(),
            shutdown_signal: false,
        }
    }

    pub(crate) fn shutdown() -> Self {
        LogEvent {
            level: LogLevel::Fatal,
            message: String::new(),
            location: SourceLocation {
                file: "",
                line: 0,
                function: "",
            },
            timestamp: std::time::SystemTime::now(),
            thread_id: 0,
            process_id: std::process::id(),
            shutdown_signal: true,
        }
    }
}

/// A cheap, stable stand-in for a native thread id: Rust's `ThreadId`
/// doesn't expose an integer, so entries hash it instead (still stable
/// for the lifetime of the thread, which is all the detailed format
/// needs it for).
fn thread_id_u64() -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    hasher.finish()
}
