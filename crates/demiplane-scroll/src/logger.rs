use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ScrollError, ScrollResult};
use crate::event::LogEvent;
use crate::level::LogLevel;
use crate::ring::RingBuffer;
use crate::sink::Sink;
use crate::wait::WaitStrategy;

const VALID_RING_SIZES: [usize; 4] = [1024, 8192, 65536, 131072];

/// Builder for [`Logger`] (spec §6 "Configuration" — Logger).
#[derive(Clone)]
pub struct LoggerConfig {
    ring_buffer_size: usize,
    wait_strategy: WaitStrategy,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            ring_buffer_size: 8192,
            wait_strategy: WaitStrategy::Yielding,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ring_buffer_size(mut self, size: usize) -> Self {
        self.ring_buffer_size = size;
        self
    }

    pub fn wait_strategy(mut self, strategy: WaitStrategy) -> Self {
        self.wait_strategy = strategy;
        self
    }

    fn validate(&self) -> ScrollResult<()> {
        if !VALID_RING_SIZES.contains(&self.ring_buffer_size) {
            return Err(ScrollError::InvalidRingBufferSize(self.ring_buffer_size));
        }
        Ok(())
    }

    /// Builds the logger and starts its single consumer thread, dispatching
    /// to `sinks` in declaration order (spec §4.5 "Consumer loop").
    pub fn build(self, sinks: Vec<Arc<dyn Sink>>) -> ScrollResult<Logger> {
        self.validate()?;
        let ring = Arc::new(RingBuffer::new(self.ring_buffer_size, self.wait_strategy));
        let consumer_ring = Arc::clone(&ring);
        let consumer_sinks = sinks.clone();
        let handle = std::thread::Builder::new()
            .name("demiplane-scroll-consumer".to_string())
            .spawn(move || consume(consumer_ring, consumer_sinks))
            .expect("spawning the logger consumer thread");
        Ok(Logger {
            ring,
            sinks,
            consumer: Some(handle),
            shut_down: AtomicBool::new(false),
        })
    }
}

fn consume(ring: Arc<RingBuffer>, sinks: Vec<Arc<dyn Sink>>) {
    let mut next_seq: i64 = 0;
    loop {
        let highest = ring.wait_for_published(next_seq - 1);
        for seq in next_seq..=highest {
            let event = ring.read(seq);
            if event.shutdown_signal {
                for sink in &sinks {
                    sink.flush();
                }
                ring.mark_consumed(seq);
                return;
            }
            for sink in &sinks {
                sink.process(event);
            }
        }
        ring.mark_consumed(highest);
        next_seq = highest + 1;
    }
}

/// MPSC disruptor logger: producers claim a sequence, write a
/// [`LogEvent`], and publish; the single consumer thread dispatches each
/// published event to every sink (spec §4.5).
pub struct Logger {
    ring: Arc<RingBuffer>,
    sinks: Vec<Arc<dyn Sink>>,
    consumer: Option<std::thread::JoinHandle<()>>,
    shut_down: AtomicBool,
}

impl Logger {
    pub fn builder() -> LoggerConfig {
        LoggerConfig::new()
    }

    /// `function` is the name of the calling function — pass
    /// `demiplane_gears::function_name!()` from the call site, since it
    /// can only be captured there, not inside this method.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>, function: &'static str) {
        self.publish(LogEvent::new(level, message.into(), function));
    }

    fn publish(&self, event: LogEvent) {
        let seq = self.ring.claim();
        self.ring.write(seq, event);
        self.ring.publish(seq);
    }

    /// Starts a fragment accumulator that performs one claim/publish on
    /// drop, carrying the concatenated message (spec §4.5 "Stream-style
    /// call"). `function` is the name of the calling function, the same
    /// as with [`Logger::log`].
    pub fn stream(&self, level: LogLevel, function: &'static str) -> LogStream<'_> {
        LogStream {
            logger: self,
            level,
            function,
            buffer: String::new(),
        }
    }

    pub fn sinks(&self) -> &[Arc<dyn Sink>] {
        &self.sinks
    }

    /// Injects a shutdown-signal event and joins the consumer thread once
    /// every earlier event has been flushed to every sink (spec §4.5
    /// "Consumer loop", §5 "Cancellation / timeouts").
    pub fn shutdown(&mut self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }
        self.publish(LogEvent::shutdown());
        if let Some(handle) = self.consumer.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Accumulates `write!`-style fragments and, on drop, performs one
/// claim/publish carrying the concatenated message.
pub struct LogStream<'a> {
    logger: &'a Logger,
    level: LogLevel,
    function: &'static str,
    buffer: String,
}

impl std::fmt::Write for LogStream<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

impl Drop for LogStream<'_> {
    fn drop(&mut self) {
        if !self.buffer.is_empty() {
            self.logger
                .publish(LogEvent::new(self.level, std::mem::take(&mut self.buffer), self.function));
        }
    }
}
