use demiplane_query::CompiledQuery;
use tokio_postgres::types::{FromSql, Type};
use tokio_postgres::{Client, NoTls};
use tracing::{debug, warn};

use crate::error::{ExecError, ExecResult};
use crate::oid::decode_binary;
use crate::param::PgParamPacket;
use crate::result::ResultBlock;

/// Bridges `tokio_postgres`'s typed `FromSql` machinery back to the raw
/// bytes our own OID table decodes — the built-in `FromSql` impls each
/// accept only their one matching OID, but the whole point of spec
/// §4.4's decoder table is to own that dispatch ourselves.
struct RawCell<'a>(Option<&'a [u8]>);

impl<'a> FromSql<'a> for RawCell<'a> {
    fn from_sql(_ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        Ok(RawCell(Some(raw)))
    }

    fn from_sql_null(_ty: &Type) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        Ok(RawCell(None))
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

/// Owns one PostgreSQL connection and executes either raw SQL text or a
/// compiled, parameter-bound query (spec §4.4). Connections are not
/// shared across `Executor`s; concurrent callers need one each or must
/// serialise externally (spec §5 "Shared-resource policy").
pub struct Executor {
    client: Client,
    connection: tokio::task::JoinHandle<()>,
}

impl Executor {
    /// Opens a connection, driving the background I/O task on the
    /// current `tokio` runtime (teacher pattern: spawn-and-hold the
    /// connection's driver future alongside the handle that uses it).
    pub async fn connect(config: &str) -> ExecResult<Self> {
        let (client, connection) = tokio_postgres::connect(config, NoTls).await?;
        let connection = tokio::spawn(async move {
            if let Err(err) = connection.await {
                warn!(error = %err, "postgres connection driver exited");
            }
        });
        Ok(Executor { client, connection })
    }

    /// Executes `sql` with no bound parameters.
    pub async fn execute_sql(&self, sql: &str) -> ExecResult<ResultBlock> {
        debug!(sql, "executing raw statement");
        let rows = self.client.query(sql, &[]).await?;
        Ok(rows_to_block(&rows)?)
    }

    /// Executes a compiled, parameter-bound query (spec §4.4 steps 1-4).
    ///
    /// Prepares the statement with the OIDs our own codec chose for each
    /// parameter, rather than letting the server infer them from query
    /// context — otherwise nothing guarantees the server's inferred wire
    /// type agrees with the bytes `PgParam::to_sql` already encoded.
    pub async fn execute(&self, compiled: &CompiledQuery<PgParamPacket>) -> ExecResult<ResultBlock> {
        debug!(sql = %compiled.sql, params = compiled.packet.0.len(), "executing compiled query");
        let oids: Vec<Type> = compiled
            .packet
            .0
            .iter()
            .map(|p| Type::from_oid(p.oid).unwrap_or(Type::UNKNOWN))
            .collect();
        let statement = self.client.prepare_typed(&compiled.sql, &oids).await?;
        let params = compiled.packet.as_sql_params();
        let rows = self.client.query(&statement, &params).await?;
        Ok(rows_to_block(&rows)?)
    }

    /// `true` once the connection's driver task has exited.
    pub fn is_closed(&self) -> bool {
        self.connection.is_finished()
    }
}

fn rows_to_block(rows: &[tokio_postgres::Row]) -> ExecResult<ResultBlock> {
    let columns = rows
        .first()
        .map(|r| r.columns().iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let mut decoded = Vec::with_capacity(row.columns().len());
        for (idx, column) in row.columns().iter().enumerate() {
            let RawCell(raw) = row.try_get::<_, RawCell<'_>>(idx).map_err(|_| ExecError::DecodeError {
                oid: column.type_().oid(),
                reason: "failed to read raw column bytes".to_string(),
            })?;
            decoded.push(decode_binary(column.type_().oid(), raw)?);
        }
        out.push(decoded);
    }

    Ok(ResultBlock { columns, rows: out })
}
