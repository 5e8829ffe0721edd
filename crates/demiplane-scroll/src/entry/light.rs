use crate::event::LogEvent;

/// Level + message only — the cheap entry for high-volume sinks that
/// don't need source location or thread/process metadata (dropped from
/// the detailed format the distillation kept, restored here since the
/// original ships both).
pub struct LightEntry<'a> {
    event: &'a LogEvent,
}

impl<'a> LightEntry<'a> {
    pub fn new(event: &'a LogEvent) -> Self {
        LightEntry { event }
    }

    pub fn to_line(&self) -> String {
        format!("{} {}", self.event.level.name(), self.event.message)
    }
}
