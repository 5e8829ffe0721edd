use std::time::Duration;

/// Reclamation policy for a registered slot (spec §4.6 "Registration").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Never reclaimed; `reset` fails with `ImmortalSlot`.
    Immortal,
    /// May be reclaimed on an explicit `reset`.
    Resettable,
    /// Reclaimed once no external strong reference remains.
    Scoped,
    /// Reclaimed once `now - last_touch` exceeds `ttl`.
    Timed(Duration),
}

impl Default for Lifetime {
    fn default() -> Self {
        Lifetime::Resettable
    }
}
