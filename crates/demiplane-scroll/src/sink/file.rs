use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;

use crate::entry::DetailedEntry;
use crate::error::ScrollError;
use crate::event::LogEvent;
use crate::level::LogLevel;
use crate::sink::Sink;

const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Builder for [`FileSink`] (spec §6 "Configuration" — File sink).
/// Rotation requires time-stamped filenames; validated at construction,
/// not deferred to the first write.
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    threshold: LogLevel,
    file: PathBuf,
    add_time_to_filename: bool,
    time_format: String,
    rotation: bool,
    max_file_size: u64,
    flush_each_entry: bool,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        FileSinkConfig {
            threshold: LogLevel::Debug,
            file: PathBuf::new(),
            add_time_to_filename: true,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            rotation: true,
            max_file_size: 100 * 1024 * 1024,
            flush_each_entry: false,
        }
    }
}

impl FileSinkConfig {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        FileSinkConfig {
            file: file.into(),
            ..Default::default()
        }
    }

    pub fn threshold(mut self, threshold: LogLevel) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn add_time_to_filename(mut self, add: bool) -> Self {
        self.add_time_to_filename = add;
        self
    }

    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    pub fn rotation(mut self, enabled: bool) -> Self {
        self.rotation = enabled;
        self
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn flush_each_entry(mut self, flush: bool) -> Self {
        self.flush_each_entry = flush;
        self
    }

    fn validate(&self) -> Result<(), ScrollError> {
        if self.file.as_os_str().is_empty() {
            return Err(ScrollError::InvalidSinkConfig {
                reason: "file path must be specified".to_string(),
            });
        }
        if self.add_time_to_filename && self.time_format.is_empty() {
            return Err(ScrollError::InvalidSinkConfig {
                reason: "time format must be specified".to_string(),
            });
        }
        if self.rotation && !self.add_time_to_filename {
            return Err(ScrollError::InvalidSinkConfig {
                reason: "rotation requires time-stamped filenames".to_string(),
            });
        }
        if self.rotation && self.max_file_size == 0 {
            return Err(ScrollError::InvalidSinkConfig {
                reason: "max_file_size must be greater than 0 when rotation is enabled".to_string(),
            });
        }
        Ok(())
    }

    fn stamped_path(&self) -> PathBuf {
        if !self.add_time_to_filename {
            return self.file.clone();
        }
        let stamp = Utc::now().format(&self.time_format).to_string();
        let stem = self.file.file_stem().and_then(|s| s.to_str()).unwrap_or("log");
        let ext = self.file.extension().and_then(|s| s.to_str());
        let name = match ext {
            Some(ext) => format!("{stem}_{stamp}.{ext}"),
            None => format!("{stem}_{stamp}"),
        };
        self.file.with_file_name(name)
    }

    pub fn build(self) -> Result<FileSink, ScrollError> {
        self.validate()?;
        let path = self.stamped_path();
        let file = open_for_append(&path)?;
        Ok(FileSink {
            config: self,
            state: Mutex::new(FileSinkState {
                writer: BufWriter::with_capacity(64 * 1024, file),
                path,
                bytes_written: 0,
            }),
        })
    }
}

fn open_for_append(path: &std::path::Path) -> Result<File, ScrollError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ScrollError::Io {
            path: path.to_path_buf(),
            source,
        })
}

struct FileSinkState {
    writer: BufWriter<File>,
    path: PathBuf,
    bytes_written: u64,
}

/// Writes under a mutex through a user-space buffer; when rotation is
/// enabled, checks size after each write and opens a fresh time-stamped
/// file on overflow (spec §4.5 "File sink").
pub struct FileSink {
    config: FileSinkConfig,
    state: Mutex<FileSinkState>,
}

impl FileSink {
    fn rotate(&self, state: &mut FileSinkState) {
        let _ = state.writer.flush();
        let path = self.config.stamped_path();
        match open_for_append(&path) {
            Ok(file) => {
                state.writer = BufWriter::with_capacity(64 * 1024, file);
                state.path = path;
                state.bytes_written = 0;
            }
            Err(_) => {
                // Keep writing to the old file rather than lose events.
            }
        }
    }
}

impl Sink for FileSink {
    fn process(&self, event: &LogEvent) {
        if event.shutdown_signal || !self.should_log(event.level) {
            return;
        }
        let line = DetailedEntry::new(event).to_line();
        let mut state = self.state.lock().unwrap();
        if self.config.rotation && state.bytes_written >= self.config.max_file_size {
            self.rotate(&mut state);
        }
        if let Ok(()) = state.writer.write_all(line.as_bytes()).and_then(|_| state.writer.write_all(b"\n")) {
            state.bytes_written += line.len() as u64 + 1;
        }
        if self.config.flush_each_entry {
            let _ = state.writer.flush();
        }
    }

    fn flush(&self) {
        let mut state = self.state.lock().unwrap();
        let _ = state.writer.flush();
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level >= self.config.threshold
    }
}
