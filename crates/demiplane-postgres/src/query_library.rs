use std::collections::HashMap;
use std::sync::Arc;

use demiplane_query::{CompileResult, CompiledQuery};
use parking_lot::{Mutex, RwLock};

use crate::dialect::PgDialect;
use crate::param::PgParamPacket;

/// Caches compiled queries by caller-chosen name, single-flight per key
/// (spec §4.4 "Query library / caching"). The per-key construction lock
/// mirrors `demiplane-nexus`'s `Slot` double-checked locking; a
/// `QueryLibrary` is typically itself registered into a `Nexus` as a
/// `Resettable` entry (SPEC_FULL.md §6), so evicting the whole cache
/// reuses the registry's `reset` path while the name-level cache here
/// stays the library's own concern — `Nexus`'s keys are `(TypeId, u32)`,
/// not arbitrary strings.
pub struct QueryLibrary {
    dialect: PgDialect,
    cache: RwLock<HashMap<String, Arc<CompiledQuery<PgParamPacket>>>>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl QueryLibrary {
    pub fn new(dialect: PgDialect) -> Self {
        QueryLibrary {
            dialect,
            cache: RwLock::new(HashMap::new()),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn dialect(&self) -> &PgDialect {
        &self.dialect
    }

    /// Returns the cached compilation for `name`, compiling with `build`
    /// on a miss. At most one compilation runs per `name` regardless of
    /// how many callers race to produce it (spec §4.4 steps 1-2).
    pub fn produce<F>(&self, name: &str, build: F) -> CompileResult<Arc<CompiledQuery<PgParamPacket>>>
    where
        F: FnOnce(&PgDialect) -> CompileResult<CompiledQuery<PgParamPacket>>,
    {
        if let Some(hit) = self.cache.read().get(name) {
            return Ok(hit.clone());
        }

        let key_lock = self
            .locks
            .lock()
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = key_lock.lock();

        if let Some(hit) = self.cache.read().get(name) {
            return Ok(hit.clone());
        }
        let compiled = Arc::new(build(&self.dialect)?);
        self.cache.write().insert(name.to_string(), compiled.clone());
        Ok(compiled)
    }

    /// Drops `name`'s cached compilation; the next `produce` recompiles it.
    pub fn evict(&self, name: &str) {
        self.cache.write().remove(name);
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use demiplane_query::{compile_select, eq, select};
    use demiplane_schema::{Table, TableColumn};

    use super::*;

    #[test]
    fn produce_compiles_once_per_name() {
        let lib = QueryLibrary::new(PgDialect);
        let calls = AtomicUsize::new(0);

        let mut table = Table::new("users");
        table.add_field::<i32>("id", "INTEGER");
        let table = Arc::new(table);
        let id = TableColumn::<i32>::new(table.clone(), "id").unwrap();

        let build = |dialect: &PgDialect| {
            calls.fetch_add(1, Ordering::SeqCst);
            let query = select(vec![(&id).into()]).from(table.clone()).where_(eq(&id, 1_i32));
            compile_select(dialect, &query)
        };

        let first = lib.produce("by_id", build).unwrap();
        let second = lib.produce("by_id", build).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn evict_forces_recompilation() {
        let lib = QueryLibrary::new(PgDialect);
        let mut table = Table::new("users");
        table.add_field::<i32>("id", "INTEGER");
        let table = Arc::new(table);
        let id = TableColumn::<i32>::new(table.clone(), "id").unwrap();

        let build = |dialect: &PgDialect| {
            let query = select(vec![(&id).into()]).from(table.clone());
            compile_select(dialect, &query)
        };

        lib.produce("all", build).unwrap();
        assert_eq!(lib.len(), 1);
        lib.evict("all");
        assert!(lib.is_empty());
    }
}
