use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use demiplane_nexus::{Lifetime, Nexus};

/// A `Timed` slot is reclaimed once its idle duration exceeds the ttl, so a
/// `spawn` issued long after the last touch rebuilds the object rather than
/// returning the original handle (spec §4.6 "Sweeper").
#[tokio::test(start_paused = true)]
async fn timed_slot_is_reclaimed_and_rebuilt() {
    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    let nexus = Arc::new(Nexus::new());
    nexus.set_sweep_interval(Duration::from_millis(10));
    nexus.register_factory::<String, _>(0, Lifetime::Timed(Duration::from_millis(50)), || {
        Ok(format!("build-{}", BUILDS.fetch_add(1, Ordering::SeqCst)))
    });

    let first = nexus.spawn::<String>(0).unwrap();
    assert_eq!(*first, "build-0");
    drop(first);

    let sweeper = nexus.spawn_sweeper();
    tokio::time::advance(Duration::from_millis(200)).await;
    tokio::task::yield_now().await;

    let second = nexus.spawn::<String>(0).unwrap();
    assert_eq!(*second, "build-1");

    nexus.stop_sweeper();
    drop(sweeper);
}
