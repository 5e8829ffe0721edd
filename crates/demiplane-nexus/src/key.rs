use std::any::TypeId;

/// `(type-identity, numeric-id)` — the registry's map key (spec §4.6).
///
/// Mirrors the original `detail::Key{std::type_index, nexus_id_t}`; Rust's
/// `TypeId` plays the role `std::type_index` does there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub(crate) type_id: TypeId,
    pub(crate) id: u32,
}

impl Key {
    pub fn of<T: 'static>(id: u32) -> Self {
        Key {
            type_id: TypeId::of::<T>(),
            id,
        }
    }
}
