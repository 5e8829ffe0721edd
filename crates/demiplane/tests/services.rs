use std::sync::Arc;

use demiplane::{LogEvent, LogLevel, LoggerConfig, QueryLibrary, Services, Sink, log};

struct NullSink;

impl Sink for NullSink {
    fn process(&self, _event: &LogEvent) {}
    fn flush(&self) {}
    fn should_log(&self, _level: LogLevel) -> bool {
        true
    }
}

#[test]
fn services_wires_logger_and_query_library_through_nexus() {
    let sinks: Vec<Arc<dyn Sink>> = vec![Arc::new(NullSink)];
    let services = Services::new(LoggerConfig::new(), sinks).expect("valid logger config");

    log!(services.logger, LogLevel::Info, "services booted");
    assert_eq!(services.nexus.size(), 2);

    let cached: Arc<QueryLibrary> = services.nexus.spawn(0).expect("query library was registered");
    assert!(Arc::ptr_eq(&cached, &services.queries));
}
