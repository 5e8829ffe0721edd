use demiplane_schema::FieldValue;

/// The opaque parameter packet a dialect accumulates while compiling
/// (spec §4.3 "make_param_sink"). PostgreSQL's packet holds parallel
/// `(oid, length, bytes, format-flag)` arrays; see `demiplane-postgres`.
pub trait ParamPacket: Default {
    /// Pushes `value`, returning its 1-based placeholder index.
    fn push(&mut self, value: &FieldValue) -> usize;
}

/// Per-backend SQL rendering contract (spec §4.3 "Dialect contract").
pub trait SqlDialect {
    type Packet: ParamPacket;

    fn quote_identifier(&self, name: &str) -> String;
    fn placeholder(&self, index: usize) -> String;
    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String;
    /// Inline literal rendering for the rare non-parameterised path.
    fn format_value(&self, buf: &mut String, value: &FieldValue);

    fn supports_returning(&self) -> bool {
        true
    }
    fn supports_cte(&self) -> bool {
        true
    }
    fn supports_window_functions(&self) -> bool {
        true
    }
    fn supports_lateral_joins(&self) -> bool {
        true
    }

    fn make_param_sink(&self) -> Self::Packet {
        Self::Packet::default()
    }
}
