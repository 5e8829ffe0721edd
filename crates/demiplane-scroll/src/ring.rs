use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicI64, Ordering};

use crossbeam_utils::CachePadded;

use crate::event::LogEvent;
use crate::wait::{Parker, WaitStrategy};

/// Fixed power-of-two ring of `LogEvent` slots with the multi-producer
/// claim/publish protocol (spec §4.5 "Ring buffer", "Sequencer").
///
/// Each slot is exclusively owned by the producer that claimed its
/// sequence until that producer publishes it; after publish, it is
/// read-only until the single consumer has processed it and the ring
/// wraps back around. That exclusivity — never two producers, never a
/// producer and the consumer, touching the same slot at once — is what
/// makes the `UnsafeCell` access below sound.
pub(crate) struct RingBuffer {
    slots: Box<[UnsafeCell<MaybeUninit<LogEvent>>]>,
    mask: i64,
    claimed: CachePadded<AtomicI64>,
    cursor: CachePadded<AtomicI64>,
    gating: CachePadded<AtomicI64>,
    wait_strategy: WaitStrategy,
    producer_parker: Parker,
    consumer_parker: Parker,
}

unsafe impl Sync for RingBuffer {}
unsafe impl Send for RingBuffer {}

impl RingBuffer {
    /// `capacity` must be a power of two; construction panics otherwise,
    /// matching the original's invariant that ring-buffer misconfiguration
    /// is an unrecoverable programming error rather than a runtime `Outcome`
    /// (spec §12 "Exception vs. result").
    pub(crate) fn new(capacity: usize, wait_strategy: WaitStrategy) -> Self {
        assert!(capacity.is_power_of_two(), "ring buffer capacity must be a power of two");
        let slots = (0..capacity)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        RingBuffer {
            slots,
            mask: capacity as i64 - 1,
            claimed: CachePadded::new(AtomicI64::new(-1)),
            cursor: CachePadded::new(AtomicI64::new(-1)),
            gating: CachePadded::new(AtomicI64::new(-1)),
            wait_strategy,
            producer_parker: Parker::default(),
            consumer_parker: Parker::default(),
        }
    }

    fn capacity(&self) -> i64 {
        self.mask + 1
    }

    /// Reserves the next sequence, stalling while the ring is full
    /// (spec §4.5 `claim()`).
    pub(crate) fn claim(&self) -> i64 {
        let seq = self.claimed.fetch_add(1, Ordering::SeqCst) + 1;
        let capacity = self.capacity();
        self.wait_strategy
            .wait_until(&self.producer_parker, || seq - self.gating.load(Ordering::Acquire) < capacity);
        seq
    }

    /// Writes `event` into the slot claimed as `seq`. Safe because the
    /// caller is the sole owner of that slot between `claim` and `publish`.
    pub(crate) fn write(&self, seq: i64, event: LogEvent) {
        let idx = (seq & self.mask) as usize;
        unsafe {
            (*self.slots[idx].get()).write(event);
        }
    }

    /// Advances the published cursor to `seq` once every earlier sequence
    /// has been published, then wakes the consumer (spec §4.5 `publish(s)`).
    pub(crate) fn publish(&self, seq: i64) {
        self.wait_strategy
            .wait_until(&self.producer_parker, || self.cursor.load(Ordering::Acquire) == seq - 1);
        self.cursor.store(seq, Ordering::Release);
        self.consumer_parker.notify();
    }

    /// Blocks until at least one sequence beyond `after` has been
    /// published, then returns the highest published sequence.
    pub(crate) fn wait_for_published(&self, after: i64) -> i64 {
        let mut highest = self.cursor.load(Ordering::Acquire);
        self.wait_strategy.wait_until(&self.consumer_parker, || {
            highest = self.cursor.load(Ordering::Acquire);
            highest > after
        });
        highest
    }

    /// Reads the slot at `seq`. Safe once `seq <= cursor`: the writing
    /// producer's `publish` release-store happens-before this load.
    pub(crate) fn read(&self, seq: i64) -> &LogEvent {
        let idx = (seq & self.mask) as usize;
        unsafe { (*self.slots[idx].get()).assume_init_ref() }
    }

    pub(crate) fn mark_consumed(&self, through: i64) {
        self.gating.store(through, Ordering::Release);
    }
}
