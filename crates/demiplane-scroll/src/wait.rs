use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// How a producer or the consumer spins while waiting on the sequencer
/// (spec §4.5 "Wait strategies").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitStrategy {
    /// Spin on the atomic. Lowest latency, full CPU.
    BusySpin,
    /// Yield the thread on each failed probe. The default.
    #[default]
    Yielding,
    /// Park on a condition variable signalled on publish. Lowest CPU,
    /// highest latency.
    Blocking,
}

/// Shared parking state for the `Blocking` strategy; a no-op for the
/// spinning strategies.
#[derive(Default)]
pub(crate) struct Parker {
    inner: Mutex<()>,
    condvar: Condvar,
}

impl Parker {
    pub(crate) fn notify(&self) {
        self.condvar.notify_all();
    }

    pub(crate) fn park_briefly(&self) {
        let guard = self.inner.lock().unwrap();
        let _ = self.condvar.wait_timeout(guard, Duration::from_millis(1));
    }
}

impl WaitStrategy {
    /// Spins `probe` to completion, applying this strategy's backoff
    /// between failed attempts.
    pub(crate) fn wait_until(&self, parker: &Parker, mut probe: impl FnMut() -> bool) {
        while !probe() {
            match self {
                WaitStrategy::BusySpin => std::hint::spin_loop(),
                WaitStrategy::Yielding => std::thread::yield_now(),
                WaitStrategy::Blocking => parker.park_briefly(),
            }
        }
    }
}
