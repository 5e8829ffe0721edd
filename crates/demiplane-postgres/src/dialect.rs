use demiplane_query::SqlDialect;
use demiplane_schema::FieldValue;

use crate::param::PgParamPacket;

/// PostgreSQL's `SqlDialect` (spec §4.4). Identifier quoting doubles
/// embedded `"`; placeholders are `$N`, 1-based; every optional capability
/// the trait exposes is supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgDialect;

impl SqlDialect for PgDialect {
    type Packet = PgParamPacket;

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${index}")
    }

    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        let mut clause = String::new();
        if let Some(limit) = limit {
            clause.push_str(&format!("LIMIT {limit}"));
        }
        if let Some(offset) = offset {
            if !clause.is_empty() {
                clause.push(' ');
            }
            clause.push_str(&format!("OFFSET {offset}"));
        }
        clause
    }

    /// Inline literal rendering for the rare non-parameterised path
    /// (spec §6 "String literals (non-parameterised path)").
    fn format_value(&self, buf: &mut String, value: &FieldValue) {
        match value {
            FieldValue::Null => buf.push_str("NULL"),
            FieldValue::Bool(b) => buf.push_str(if *b { "true" } else { "false" }),
            FieldValue::I32(n) => buf.push_str(&n.to_string()),
            FieldValue::I64(n) => buf.push_str(&n.to_string()),
            FieldValue::F32(f) => buf.push_str(&f.to_string()),
            FieldValue::F64(f) => buf.push_str(&f.to_string()),
            FieldValue::Text(s) => {
                buf.push('\'');
                buf.push_str(&s.replace('\\', "\\\\").replace('\'', "''"));
                buf.push('\'');
            }
            FieldValue::Bytes(b) => {
                buf.push_str("'\\x");
                for byte in b.iter() {
                    buf.push_str(&format!("{byte:02x}"));
                }
                buf.push('\'');
            }
        }
    }

    fn make_param_sink(&self) -> Self::Packet {
        PgParamPacket::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_embedded_double_quote() {
        assert_eq!(PgDialect.quote_identifier(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn placeholder_is_one_based() {
        assert_eq!(PgDialect.placeholder(1), "$1");
    }

    #[test]
    fn escapes_string_literal() {
        let mut buf = String::new();
        PgDialect.format_value(&mut buf, &FieldValue::Text("it's \\ here".to_string().into()));
        assert_eq!(buf, r#"'it''s \\ here'"#);
    }

    #[test]
    fn bytea_literal_is_hex() {
        let mut buf = String::new();
        PgDialect.format_value(&mut buf, &FieldValue::Bytes(vec![0xde, 0xad].into()));
        assert_eq!(buf, "'\\xdead'");
    }
}
