//! Process-wide service-lifetime registry (spec §4.6).
//!
//! A map keyed by `(type-identity, numeric-id)` to a slot holding an
//! object, an optional factory, and a reclamation [`Lifetime`]. Intended
//! to be constructed once by an application entrypoint and threaded
//! explicitly into whatever owns the logger or a compiled-query cache,
//! rather than reached for as an implicit global.

mod error;
mod key;
mod lifetime;
mod registry;
mod slot;

pub use error::{NexusError, NexusResult};
pub use key::Key;
pub use lifetime::Lifetime;
pub use registry::Nexus;
