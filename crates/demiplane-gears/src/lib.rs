//! Shared error plumbing used by every other `demiplane` crate.
//!
//! Each crate defines its own `thiserror` error enum (`NexusError`,
//! `ScrollError`, `CompileError`, `ExecError`, ...); this crate supplies
//! the small amount of common infrastructure those enums lean on:
//! a `#[track_caller]` location-capturing helper and the `Located<E>`
//! wrapper that error constructors use to record "what failed, where."

use std::fmt;
use std::panic::Location;

/// Wraps an error with the source location that raised it.
///
/// Mirrors the teacher's `AnnotatedSqlxError` (file/line + wrapped
/// `sqlx::Error`), generalised to any inner error type so every crate's
/// error enum can carry a `Located<E>` variant instead of re-deriving
/// the same bookkeeping.
#[derive(Debug)]
pub struct Located<E> {
    pub file: &'static str,
    pub line: u32,
    pub source: E,
}

impl<E> Located<E> {
    #[track_caller]
    pub fn new(source: E) -> Self {
        let loc = Location::caller();
        Located {
            file: loc.file(),
            line: loc.line(),
            source,
        }
    }
}

impl<E: fmt::Display> fmt::Display for Located<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.source, self.file, self.line)
    }
}

impl<E: std::error::Error + 'static> std::error::Error for Located<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Captures the qualified path of the function it's expanded in — the
/// Rust analogue of the original's `__FUNCTION__` capture (spec §6 log
/// format's `[file:line func]` segment). Must be expanded directly in the
/// function whose name is wanted; calling it from inside a helper only
/// ever names that helper.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn marker() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(marker);
        &name[..name.len() - "::marker".len()]
    }};
}

/// Marker for types identifying a single entity (table/record) the way
/// the original `gears_templates.hpp` field descriptors did at compile
/// time. `demiplane-gears-macros`'s `#[derive(Entity)]` produces an
/// implementation of this trait.
pub trait EntityDescriptor {
    /// The SQL table name this entity maps to.
    const TABLE_NAME: &'static str;
}
