use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use demiplane_nexus::{Lifetime, Nexus};

struct Counter(usize);

/// 16 threads concurrently `spawn::<Counter>()` against a freshly
/// registered factory that increments a static counter; the static
/// counter must land on exactly 1 and every thread must observe the same
/// object (spec §13 scenario 5).
#[test]
fn single_flight_construction_under_contention() {
    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    let nexus = Arc::new(Nexus::new());
    nexus.register_factory::<Counter, _>(0, Lifetime::Resettable, || {
        let n = BUILDS.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Counter(n))
    });

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let nexus = Arc::clone(&nexus);
            thread::spawn(move || nexus.spawn::<Counter>(0).expect("registered"))
        })
        .collect();

    let results: Vec<Arc<Counter>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
    for handle in &results {
        assert!(Arc::ptr_eq(handle, &results[0]));
    }
}

#[test]
fn reset_on_missing_key_is_not_registered() {
    struct Unregistered;
    let nexus = Nexus::new();
    assert!(matches!(
        nexus.reset::<Unregistered>(0),
        Err(demiplane_nexus::NexusError::NotRegistered)
    ));
}

#[test]
fn reset_on_immortal_fails() {
    let nexus = Nexus::new();
    nexus.register_instance(0, Lifetime::Immortal, 42_i32);
    assert!(matches!(
        nexus.reset::<i32>(0),
        Err(demiplane_nexus::NexusError::ImmortalSlot)
    ));
}

#[test]
fn resettable_slot_reconstructs_after_reset() {
    static BUILDS: AtomicUsize = AtomicUsize::new(0);
    let nexus = Nexus::new();
    nexus.register_factory::<i64, _>(0, Lifetime::Resettable, || {
        Ok(BUILDS.fetch_add(1, Ordering::SeqCst) as i64)
    });

    let first = nexus.spawn::<i64>(0).unwrap();
    assert_eq!(*first, 0);
    nexus.reset::<i64>(0).unwrap();
    let second = nexus.spawn::<i64>(0).unwrap();
    assert_eq!(*second, 1);
}
