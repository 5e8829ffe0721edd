//! PostgreSQL `SqlDialect`, binary OID codec, and async executor (spec §4.4).
//!
//! Built on `tokio-postgres` rather than `sqlx`: the spec calls for
//! hand-rolled binary encoding/decoding keyed by OID and a custom
//! `ParamSink`, exactly the layer `sqlx` hides from callers.

pub mod dialect;
pub mod error;
pub mod executor;
pub mod oid;
pub mod param;
pub mod query_library;
pub mod result;

pub use dialect::PgDialect;
pub use error::{ExecError, ExecResult};
pub use executor::Executor;
pub use param::{PgParam, PgParamPacket};
pub use query_library::QueryLibrary;
pub use result::ResultBlock;
