use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::error::{NexusError, NexusResult};
use crate::lifetime::Lifetime;

pub(crate) type SharedAny = Arc<dyn Any + Send + Sync>;
pub(crate) type Factory = Box<dyn Fn() -> NexusResult<SharedAny> + Send + Sync>;

/// One registry entry (spec §4.6 `Slot`).
///
/// `obj`/`last_touch` are guarded together so a concurrent `spawn` can
/// never observe a freshly-built object next to a stale touch time.
/// `construction` is a distinct mutex held only while the factory runs,
/// so readers checking `state.obj` under the registry's read lock are
/// never blocked on first-time construction of an unrelated slot.
pub(crate) struct Slot {
    pub(crate) state: Mutex<SlotState>,
    pub(crate) construction: Mutex<()>,
    pub(crate) factory: Option<Factory>,
    pub(crate) lifetime: Lifetime,
}

pub(crate) struct SlotState {
    pub(crate) obj: Option<SharedAny>,
    pub(crate) last_touch: Instant,
}

impl Slot {
    pub(crate) fn eager(obj: SharedAny, lifetime: Lifetime) -> Self {
        Slot {
            state: Mutex::new(SlotState {
                obj: Some(obj),
                last_touch: Instant::now(),
            }),
            construction: Mutex::new(()),
            factory: None,
            lifetime,
        }
    }

    pub(crate) fn lazy(factory: Factory, lifetime: Lifetime) -> Self {
        Slot {
            state: Mutex::new(SlotState {
                obj: None,
                last_touch: Instant::now(),
            }),
            construction: Mutex::new(()),
            factory: Some(factory),
            lifetime,
        }
    }

    /// Double-checked single-flight construction (spec §4.6 "Spawn").
    pub(crate) fn spawn(&self) -> NexusResult<SharedAny> {
        {
            let mut state = self.state.lock();
            if let Some(obj) = &state.obj {
                state.last_touch = Instant::now();
                return Ok(obj.clone());
            }
        }
        let _guard = self.construction.lock();
        {
            let mut state = self.state.lock();
            if let Some(obj) = &state.obj {
                state.last_touch = Instant::now();
                return Ok(obj.clone());
            }
        }
        let factory = self.factory.as_ref().ok_or(NexusError::NotRegistered)?;
        let built = factory()?;
        let mut state = self.state.lock();
        state.obj = Some(built.clone());
        state.last_touch = Instant::now();
        Ok(built)
    }

    /// `None` if the slot was never constructed (factory never ran, or a
    /// prior `reset` cleared it).
    pub(crate) fn external_strong_count(&self) -> Option<usize> {
        let state = self.state.lock();
        // subtract 1: the slot's own `Arc` clone is not an external reference.
        state.obj.as_ref().map(|obj| Arc::strong_count(obj).saturating_sub(1))
    }

    pub(crate) fn idle_for(&self) -> std::time::Duration {
        self.state.lock().last_touch.elapsed()
    }

    pub(crate) fn reclaim(&self) {
        self.state.lock().obj = None;
    }
}
