use chrono::{DateTime, Utc};

use crate::event::LogEvent;

/// The full metadata profile: timestamp, source location, thread/process
/// id (spec §6 "Log file format").
///
/// `YYYY-MM-DDTHH:MM:SS.mmmZ [LEVEL] [file:line func] [tid N, pid M] <message>`
pub struct DetailedEntry<'a> {
    event: &'a LogEvent,
}

impl<'a> DetailedEntry<'a> {
    pub fn new(event: &'a LogEvent) -> Self {
        DetailedEntry { event }
    }

    pub fn to_line(&self) -> String {
        let ts: DateTime<Utc> = self.event.timestamp.into();
        format!(
            "{}Z [{}] [{}:{} {}] [tid {}, pid {}] {}",
            ts.format("%Y-%m-%dT%H:%M:%S%.3f"),
            self.event.level.short(),
            self.event.location.file,
            self.event.location.line,
            self.event.location.function,
            self.event.thread_id,
            self.event.process_id,
            self.event.message,
        )
    }
}
