use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;

use crate::error::{NexusError, NexusResult};
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::slot::Slot;

const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Process-wide map from `(type-identity, numeric-id)` to a lifetime-managed
/// slot (spec §4.6). Owns the logger and the query library in a full
/// deployment; kept here as plain shared state passed into whatever needs
/// it, rather than an implicit global singleton (spec §12 "Global state").
pub struct Nexus {
    map: RwLock<HashMap<Key, Arc<Slot>>>,
    sweep_interval_millis: AtomicU64,
    stop: AtomicBool,
}

impl Default for Nexus {
    fn default() -> Self {
        Self::new()
    }
}

impl Nexus {
    pub fn new() -> Self {
        Nexus {
            map: RwLock::new(HashMap::new()),
            sweep_interval_millis: AtomicU64::new(DEFAULT_SWEEP_INTERVAL.as_millis() as u64),
            stop: AtomicBool::new(false),
        }
    }

    pub fn set_sweep_interval(&self, interval: Duration) {
        self.sweep_interval_millis
            .store((interval.as_millis() as u64).max(1), Ordering::Relaxed);
    }

    fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_millis.load(Ordering::Relaxed))
    }

    pub fn register_factory<T, F>(&self, id: u32, lifetime: Lifetime, factory: F)
    where
        T: Any + Send + Sync + 'static,
        F: Fn() -> NexusResult<T> + Send + Sync + 'static,
    {
        let boxed: crate::slot::Factory = Box::new(move || {
            factory().map(|v| Arc::new(v) as Arc<dyn Any + Send + Sync>)
        });
        self.map
            .write()
            .insert(Key::of::<T>(id), Arc::new(Slot::lazy(boxed, lifetime)));
    }

    pub fn register_shared<T>(&self, id: u32, lifetime: Lifetime, handle: Arc<T>)
    where
        T: Any + Send + Sync + 'static,
    {
        self.map
            .write()
            .insert(Key::of::<T>(id), Arc::new(Slot::eager(handle, lifetime)));
    }

    pub fn register_instance<T>(&self, id: u32, lifetime: Lifetime, value: T)
    where
        T: Any + Send + Sync + 'static,
    {
        self.register_shared(id, lifetime, Arc::new(value));
    }

    /// Returns a shared handle, constructing it on first use (spec §4.6
    /// "Spawn"). At most one factory invocation runs per key even under
    /// concurrent callers.
    pub fn spawn<T>(&self, id: u32) -> NexusResult<Arc<T>>
    where
        T: Any + Send + Sync + 'static,
    {
        let slot = {
            let map = self.map.read();
            map.get(&Key::of::<T>(id)).cloned().ok_or(NexusError::NotRegistered)?
        };
        let obj = slot.spawn()?;
        obj.downcast::<T>()
            .map_err(|_| NexusError::ConstructionFailed {
                cause: "factory produced a value of an unexpected type".to_string(),
            })
    }

    /// Explicitly reclaims a `Resettable` slot's object; the next `spawn`
    /// reconstructs it. Fails on a missing key or an `Immortal` slot.
    pub fn reset<T>(&self, id: u32) -> NexusResult<()>
    where
        T: Any + Send + Sync + 'static,
    {
        let map = self.map.read();
        let slot = map.get(&Key::of::<T>(id)).ok_or(NexusError::NotRegistered)?;
        if slot.lifetime == Lifetime::Immortal {
            return Err(NexusError::ImmortalSlot);
        }
        slot.reclaim();
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.map.read().len()
    }

    pub fn clear(&self) {
        self.map.write().clear();
    }

    /// One pass over the map, reclaiming slots eligible under their own
    /// policy (spec §4.6 "Sweeper"). `Immortal` is never visited;
    /// `Resettable` only reclaims via explicit `reset`, not the sweep.
    fn sweep(&self) {
        let map = self.map.read();
        for slot in map.values() {
            match slot.lifetime {
                Lifetime::Immortal | Lifetime::Resettable => {}
                Lifetime::Scoped => {
                    if slot.external_strong_count() == Some(0) {
                        slot.reclaim();
                    }
                }
                Lifetime::Timed(ttl) => {
                    if slot.idle_for() > ttl {
                        slot.reclaim();
                    }
                }
            }
        }
    }

    /// Spawns the background janitor as a `tokio` task; call once per
    /// `Nexus` from inside a runtime. Exits after its current sweep once
    /// [`Nexus::stop_sweeper`] is called.
    pub fn spawn_sweeper(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(this.sweep_interval()).await;
                if this.stop.load(Ordering::Relaxed) {
                    return;
                }
                this.sweep();
            }
        })
    }

    pub fn stop_sweeper(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
