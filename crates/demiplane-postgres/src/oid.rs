//! OID-keyed binary codec (spec §4.4 "Binary decoding").
//!
//! Integer decoders swap endianness (the wire format is big-endian);
//! floats are carried through their integer representation so no
//! intermediate string ever appears on the hot path.

use std::borrow::Cow;

use byteorder::{BigEndian, ByteOrder};
use chrono::{DateTime, NaiveDate, TimeDelta};
use demiplane_schema::FieldValue;

use crate::error::{ExecError, ExecResult};

pub type Oid = u32;

pub const BOOL: Oid = 16;
pub const BYTEA: Oid = 17;
pub const INT8: Oid = 20;
pub const INT2: Oid = 21;
pub const INT4: Oid = 23;
pub const TEXT: Oid = 25;
pub const FLOAT4: Oid = 700;
pub const FLOAT8: Oid = 701;
pub const VARCHAR: Oid = 1043;
pub const NUMERIC: Oid = 1700;
pub const TIMESTAMP: Oid = 1114;
pub const TIMESTAMPTZ: Oid = 1184;

/// The OID a [`FieldValue`] binds as when used as a query parameter
/// (spec §4.3 "Numeric semantics" — the compile-time `SqlTypeMapping`
/// table, realised here as a runtime match since `FieldValue` is
/// already a closed tagged union by the time the dialect sees it).
pub fn oid_for_value(value: &FieldValue) -> Oid {
    match value {
        FieldValue::Null => TEXT,
        FieldValue::Bool(_) => BOOL,
        FieldValue::I32(_) => INT4,
        FieldValue::I64(_) => INT8,
        FieldValue::F32(_) => FLOAT4,
        FieldValue::F64(_) => FLOAT8,
        FieldValue::Text(_) => TEXT,
        FieldValue::Bytes(_) => BYTEA,
    }
}

/// Encodes `value` in PostgreSQL's binary wire format for `oid`.
pub fn encode_binary(value: &FieldValue, oid: Oid) -> Vec<u8> {
    match (oid, value) {
        (BOOL, FieldValue::Bool(b)) => vec![*b as u8],
        (INT2, FieldValue::I32(n)) => {
            let mut buf = [0u8; 2];
            BigEndian::write_i16(&mut buf, *n as i16);
            buf.to_vec()
        }
        (INT4, FieldValue::I32(n)) => {
            let mut buf = [0u8; 4];
            BigEndian::write_i32(&mut buf, *n);
            buf.to_vec()
        }
        (INT8, FieldValue::I64(n)) => {
            let mut buf = [0u8; 8];
            BigEndian::write_i64(&mut buf, *n);
            buf.to_vec()
        }
        (FLOAT4, FieldValue::F32(f)) => {
            let mut buf = [0u8; 4];
            BigEndian::write_u32(&mut buf, f.to_bits());
            buf.to_vec()
        }
        (FLOAT8, FieldValue::F64(f)) => {
            let mut buf = [0u8; 8];
            BigEndian::write_u64(&mut buf, f.to_bits());
            buf.to_vec()
        }
        (TEXT | VARCHAR, FieldValue::Text(s)) => s.as_bytes().to_vec(),
        (BYTEA, FieldValue::Bytes(b)) => b.to_vec(),
        // Any other scalar still has a well-defined textual form; fall
        // back to it rather than pretend no bytes were written.
        (_, other) => format!("{other:?}").into_bytes(),
    }
}

/// Decodes a raw binary column value for `oid` into a [`FieldValue`].
/// `bytes` is `None` for a SQL `NULL`.
pub fn decode_binary(oid: Oid, bytes: Option<&[u8]>) -> ExecResult<FieldValue> {
    let Some(bytes) = bytes else {
        return Ok(FieldValue::Null);
    };
    let decode_err = |reason: &str| ExecError::DecodeError {
        oid,
        reason: reason.to_string(),
    };
    match oid {
        BOOL => bytes
            .first()
            .map(|b| FieldValue::Bool(*b != 0))
            .ok_or_else(|| decode_err("empty bool payload")),
        INT2 => {
            if bytes.len() != 2 {
                return Err(decode_err("expected 2 bytes for int2"));
            }
            Ok(FieldValue::I32(BigEndian::read_i16(bytes) as i32))
        }
        INT4 => {
            if bytes.len() != 4 {
                return Err(decode_err("expected 4 bytes for int4"));
            }
            Ok(FieldValue::I32(BigEndian::read_i32(bytes)))
        }
        INT8 => {
            if bytes.len() != 8 {
                return Err(decode_err("expected 8 bytes for int8"));
            }
            Ok(FieldValue::I64(BigEndian::read_i64(bytes)))
        }
        FLOAT4 => {
            if bytes.len() != 4 {
                return Err(decode_err("expected 4 bytes for float4"));
            }
            Ok(FieldValue::F32(f32::from_bits(BigEndian::read_u32(bytes))))
        }
        FLOAT8 => {
            if bytes.len() != 8 {
                return Err(decode_err("expected 8 bytes for float8"));
            }
            Ok(FieldValue::F64(f64::from_bits(BigEndian::read_u64(bytes))))
        }
        TEXT | VARCHAR | NUMERIC => std::str::from_utf8(bytes)
            .map(|s| FieldValue::Text(Cow::Owned(s.to_string())))
            .map_err(|_| decode_err("invalid utf-8 in text column")),
        BYTEA => Ok(FieldValue::Bytes(Cow::Owned(bytes.to_vec()))),
        TIMESTAMP | TIMESTAMPTZ => {
            if bytes.len() != 8 {
                return Err(decode_err("expected 8 bytes for timestamp"));
            }
            let micros_since_2000 = BigEndian::read_i64(bytes);
            let epoch = NaiveDate::from_ymd_opt(2000, 1, 1)
                .expect("valid calendar date")
                .and_hms_opt(0, 0, 0)
                .expect("valid time of day")
                .and_utc();
            let ts = epoch + TimeDelta::microseconds(micros_since_2000);
            Ok(FieldValue::Text(Cow::Owned(format_timestamp(&ts))))
        }
        other => Err(ExecError::DecodeError {
            oid: other,
            reason: "no registered decoder for this OID".to_string(),
        }),
    }
}

fn format_timestamp(ts: &DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_int4() {
        let value = FieldValue::I32(-42);
        let bytes = encode_binary(&value, INT4);
        assert_eq!(decode_binary(INT4, Some(&bytes)).unwrap(), value);
    }

    #[test]
    fn round_trips_float8() {
        let value = FieldValue::F64(3.5);
        let bytes = encode_binary(&value, FLOAT8);
        assert_eq!(decode_binary(FLOAT8, Some(&bytes)).unwrap(), value);
    }

    #[test]
    fn round_trips_bool() {
        let value = FieldValue::Bool(true);
        let bytes = encode_binary(&value, BOOL);
        assert_eq!(decode_binary(BOOL, Some(&bytes)).unwrap(), value);
    }

    #[test]
    fn round_trips_text() {
        let value = FieldValue::Text(Cow::Owned("hello".to_string()));
        let bytes = encode_binary(&value, TEXT);
        assert_eq!(decode_binary(TEXT, Some(&bytes)).unwrap(), value);
    }

    #[test]
    fn round_trips_bytea() {
        let value = FieldValue::Bytes(Cow::Owned(vec![1, 2, 3, 255]));
        let bytes = encode_binary(&value, BYTEA);
        assert_eq!(decode_binary(BYTEA, Some(&bytes)).unwrap(), value);
    }

    #[test]
    fn null_decodes_regardless_of_oid() {
        assert_eq!(decode_binary(INT4, None).unwrap(), FieldValue::Null);
    }

    #[test]
    fn timestamp_decodes_epoch() {
        let decoded = decode_binary(TIMESTAMP, Some(&0i64.to_be_bytes())).unwrap();
        assert_eq!(decoded, FieldValue::Text(Cow::Owned("2000-01-01T00:00:00.000000Z".to_string())));
    }
}
