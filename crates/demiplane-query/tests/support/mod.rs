use demiplane_query::{ParamPacket, SqlDialect};
use demiplane_schema::FieldValue;

/// A deliberately minimal dialect — `$N` placeholders, double-quoted
/// identifiers — used only to exercise the compiler independently of any
/// concrete backend.
pub struct TestDialect;

#[derive(Default, Debug)]
pub struct TestPacket(pub Vec<FieldValue>);

impl ParamPacket for TestPacket {
    fn push(&mut self, value: &FieldValue) -> usize {
        self.0.push(value.clone());
        self.0.len()
    }
}

impl SqlDialect for TestDialect {
    type Packet = TestPacket;

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${index}")
    }

    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        let mut s = String::new();
        if let Some(limit) = limit {
            s.push_str(&format!("LIMIT {limit}"));
        }
        if let Some(offset) = offset {
            if !s.is_empty() {
                s.push(' ');
            }
            s.push_str(&format!("OFFSET {offset}"));
        }
        s
    }

    fn format_value(&self, buf: &mut String, value: &FieldValue) {
        buf.push_str(&format!("{value:?}"));
    }

    fn supports_cte(&self) -> bool {
        true
    }
}
