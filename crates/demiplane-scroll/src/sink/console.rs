use std::io::Write;
use std::sync::Mutex;

use crate::entry::DetailedEntry;
use crate::event::LogEvent;
use crate::level::LogLevel;
use crate::sink::Sink;

/// Which standard stream a [`ConsoleSink`] writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Builder for [`ConsoleSink`] (spec §6 "Configuration" — Console sink).
#[derive(Debug, Clone)]
pub struct ConsoleSinkConfig {
    threshold: LogLevel,
    enable_colors: bool,
    flush_each_entry: bool,
    output: ConsoleStream,
}

impl Default for ConsoleSinkConfig {
    fn default() -> Self {
        ConsoleSinkConfig {
            threshold: LogLevel::Debug,
            enable_colors: true,
            flush_each_entry: false,
            output: ConsoleStream::Stdout,
        }
    }
}

impl ConsoleSinkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, threshold: LogLevel) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn enable_colors(mut self, enable: bool) -> Self {
        self.enable_colors = enable;
        self
    }

    pub fn flush_each_entry(mut self, flush: bool) -> Self {
        self.flush_each_entry = flush;
        self
    }

    pub fn output(mut self, stream: ConsoleStream) -> Self {
        self.output = stream;
        self
    }

    pub fn build(self) -> ConsoleSink {
        ConsoleSink {
            config: self,
            lock: Mutex::new(()),
        }
    }
}

/// Writes formatted entries to a configured stream under a mutex,
/// optionally colourising by level (spec §4.5 "Console sink").
pub struct ConsoleSink {
    config: ConsoleSinkConfig,
    lock: Mutex<()>,
}

impl ConsoleSink {
    fn color_code(level: LogLevel) -> &'static str {
        match level {
            LogLevel::Trace => "\x1b[90m",
            LogLevel::Debug => "\x1b[36m",
            LogLevel::Info => "\x1b[32m",
            LogLevel::Warning => "\x1b[33m",
            LogLevel::Error => "\x1b[31m",
            LogLevel::Fatal => "\x1b[1;31m",
        }
    }
}

impl Sink for ConsoleSink {
    fn process(&self, event: &LogEvent) {
        if event.shutdown_signal || !self.should_log(event.level) {
            return;
        }
        let line = DetailedEntry::new(event).to_line();
        let _guard = self.lock.lock().unwrap();
        let colored = if self.config.enable_colors {
            format!("{}{}\x1b[0m\n", Self::color_code(event.level), line)
        } else {
            format!("{line}\n")
        };
        match self.config.output {
            ConsoleStream::Stdout => {
                let mut out = std::io::stdout();
                let _ = out.write_all(colored.as_bytes());
                if self.config.flush_each_entry {
                    let _ = out.flush();
                }
            }
            ConsoleStream::Stderr => {
                let mut err = std::io::stderr();
                let _ = err.write_all(colored.as_bytes());
                if self.config.flush_each_entry {
                    let _ = err.flush();
                }
            }
        }
    }

    fn flush(&self) {
        let _guard = self.lock.lock().unwrap();
        match self.config.output {
            ConsoleStream::Stdout => {
                let _ = std::io::stdout().flush();
            }
            ConsoleStream::Stderr => {
                let _ = std::io::stderr().flush();
            }
        }
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level >= self.config.threshold
    }
}
