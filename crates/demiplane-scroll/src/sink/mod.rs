//! Pluggable sinks (spec §4.5 "Sinks"): each implements [`Sink`] and
//! filters internally by its own threshold; the consumer calls `process`
//! unconditionally.

mod console;
mod file;

pub use console::{ConsoleSink, ConsoleSinkConfig, ConsoleStream};
pub use file::{FileSink, FileSinkConfig};

use crate::event::LogEvent;
use crate::level::LogLevel;

/// A registered destination for dispatched log events. Sinks are
/// registered once at configuration time; the sink list is not mutated
/// during logging (spec §4.5).
pub trait Sink: Send + Sync {
    fn process(&self, event: &LogEvent);
    fn flush(&self);
    fn should_log(&self, level: LogLevel) -> bool;
}
