use bytes::BytesMut;
use demiplane_query::ParamPacket;
use demiplane_schema::FieldValue;
use smallvec::SmallVec;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

use crate::oid::{encode_binary, oid_for_value};

/// One bound parameter: the OID it's tagged with, and its pre-encoded
/// binary payload (`None` for SQL `NULL`) — spec §4.4's "parallel
/// `(oid, length, value-bytes, format-flag)` arrays" collapsed into one
/// struct per slot since Rust has no PMR arena to allocate the arrays
/// from.
#[derive(Debug, Clone)]
pub struct PgParam {
    pub oid: u32,
    pub bytes: Option<Vec<u8>>,
}

impl ToSql for PgParam {
    fn to_sql(&self, _ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match &self.bytes {
            Some(bytes) => {
                out.extend_from_slice(bytes);
                Ok(IsNull::No)
            }
            None => Ok(IsNull::Yes),
        }
    }

    fn accepts(_ty: &Type) -> bool
    where
        Self: Sized,
    {
        true
    }

    to_sql_checked!();
}

/// The `ParamPacket` PostgreSQL compiles into (spec §4.3 `make_param_sink`).
/// Inline storage for up to 8 params covers the common case without a
/// heap allocation, the idiomatic stand-in for the original's PMR arena.
#[derive(Debug, Clone, Default)]
pub struct PgParamPacket(pub SmallVec<[PgParam; 8]>);

impl PgParamPacket {
    /// Borrowed handles suitable for `tokio_postgres::Client::query`.
    pub fn as_sql_params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.0.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
    }
}

impl ParamPacket for PgParamPacket {
    fn push(&mut self, value: &FieldValue) -> usize {
        let oid = oid_for_value(value);
        let bytes = if value.is_null() { None } else { Some(encode_binary(value, oid)) };
        self.0.push(PgParam { oid, bytes });
        self.0.len()
    }
}
