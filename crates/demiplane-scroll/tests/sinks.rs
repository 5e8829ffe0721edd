use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use demiplane_scroll::sink::{ConsoleSinkConfig, ConsoleStream, FileSinkConfig};
use demiplane_scroll::{LogLevel, LoggerConfig, Sink, log};

struct CountingSink {
    threshold: LogLevel,
    count: AtomicUsize,
}

impl Sink for CountingSink {
    fn process(&self, event: &demiplane_scroll::LogEvent) {
        if self.should_log(event.level) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn flush(&self) {}

    fn should_log(&self, level: LogLevel) -> bool {
        level >= self.threshold
    }
}

/// Each sink filters by its own threshold; a below-threshold event
/// reaches `process` (the consumer dispatches unconditionally) but is
/// dropped internally (spec §4.5 "Sinks").
#[test]
fn per_sink_thresholds_are_independent() {
    let low = Arc::new(CountingSink {
        threshold: LogLevel::Debug,
        count: AtomicUsize::new(0),
    });
    let high = Arc::new(CountingSink {
        threshold: LogLevel::Error,
        count: AtomicUsize::new(0),
    });

    let logger = LoggerConfig::new()
        .build(vec![low.clone(), high.clone()])
        .unwrap();

    log!(logger, LogLevel::Debug, "debug event");
    log!(logger, LogLevel::Warning, "warning event");
    log!(logger, LogLevel::Error, "error event");

    drop(logger);

    assert_eq!(low.count.load(Ordering::SeqCst), 3);
    assert_eq!(high.count.load(Ordering::SeqCst), 1);
}

#[test]
fn console_sink_config_builds_without_a_live_terminal() {
    let sink = ConsoleSinkConfig::new()
        .threshold(LogLevel::Warning)
        .enable_colors(false)
        .output(ConsoleStream::Stderr)
        .build();
    assert!(!sink.should_log(LogLevel::Debug));
    assert!(sink.should_log(LogLevel::Error));
}

#[test]
fn file_sink_config_rejects_rotation_without_timestamped_name() {
    let dir = tempfile::tempdir().unwrap();
    let result = FileSinkConfig::new(dir.path().join("app.log"))
        .add_time_to_filename(false)
        .rotation(true)
        .build();
    assert!(result.is_err());
}

#[test]
fn file_sink_writes_entries_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileSinkConfig::new(dir.path().join("app.log"))
        .rotation(false)
        .add_time_to_filename(false)
        .flush_each_entry(true)
        .build()
        .unwrap();

    let logger = LoggerConfig::new().build(vec![Arc::new(sink)]).unwrap();
    log!(logger, LogLevel::Info, "hello from the file sink");
    drop(logger);

    let contents = std::fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert!(contents.contains("hello from the file sink"));
    assert!(contents.contains("[INF]"));
}
