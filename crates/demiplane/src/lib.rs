//! Facade crate: re-exports the query builder, disruptor logger, and
//! service registry under one name, plus [`Services`], the thin
//! entrypoint struct that wires them together for an application.

pub use demiplane_gears::{EntityDescriptor, Located};
pub use demiplane_gears_macros::Entity;
pub use demiplane_nexus::{Key, Lifetime, Nexus, NexusError, NexusResult};
pub use demiplane_postgres::{Executor, ExecError, ExecResult, PgDialect, PgParam, PgParamPacket, QueryLibrary, ResultBlock};
pub use demiplane_query::{
    CompileError, CompileResult, CompiledQuery, Condition, DeleteQuery, Expr, InsertQuery, Join, JoinKind,
    OrderDirection, ParamPacket, SelectBuilder, SelectQuery, SetOpQuery, SqlDialect, UpdateQuery, and_, avg, between,
    case_, compile_delete, compile_insert, compile_select, compile_setop, compile_update, count, count_distinct,
    count_star, delete_from, eq, except, exists, ge, gt, in_list, in_subquery, insert_into, intersect, is_not_null,
    is_null, le, lt, max, min, ne, not_, not_exists, or_, select, sum, union_, union_all, update, with,
};
pub use demiplane_schema::{
    AllColumns, DynamicColumn, EntityTrait, Field, FieldSchema, FieldValue, FromFieldValue, IntoFieldValue, Record,
    SchemaError, SchemaResult, Table, TableColumn, TableHandle,
};
pub use demiplane_scroll::{
    LogEvent, LogLevel, LogStream, Logger, LoggerConfig, ScrollError, ScrollResult, Sink, WaitStrategy, log, stream,
};

use std::sync::Arc;

/// Everything an application wires up once at startup: the service
/// registry, the disruptor logger, and a PostgreSQL query library —
/// all owned together so a caller has one handle to thread through the
/// rest of the program (spec §3 data-flow paragraph: "registry",
/// "logger", "query library" as the three cooperating subsystems).
pub struct Services {
    pub nexus: Arc<Nexus>,
    pub logger: Arc<Logger>,
    pub queries: Arc<QueryLibrary>,
}

impl Services {
    /// Builds the logger from `logger_config` and `sinks`, and a query
    /// library over the PostgreSQL dialect, registering the logger as
    /// `Immortal` and the query library as `Resettable` in a fresh
    /// `Nexus` (spec §6 "it is registered as a Resettable Nexus entry").
    pub fn new(logger_config: LoggerConfig, sinks: Vec<Arc<dyn Sink>>) -> ScrollResult<Self> {
        let logger = Arc::new(logger_config.build(sinks)?);
        let nexus = Arc::new(Nexus::new());
        nexus.register_shared(0, Lifetime::Immortal, logger.clone());

        let queries = Arc::new(QueryLibrary::new(PgDialect));
        nexus.register_shared(0, Lifetime::Resettable, queries.clone());

        Ok(Services { nexus, logger, queries })
    }

    /// Spawns the registry's background sweeper on the current `tokio`
    /// runtime.
    pub fn spawn_sweeper(&self) -> tokio::task::JoinHandle<()> {
        self.nexus.spawn_sweeper()
    }
}
