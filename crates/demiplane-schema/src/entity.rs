use std::sync::Arc;

use crate::error::SchemaResult;
use crate::record::Record;
use crate::table::Table;

/// Bridges a compile-time entity description (produced by
/// `#[derive(Entity)]` in `demiplane-gears-macros`) to the runtime
/// `Table` it describes (spec §4.1 "`Table::make<Schema>()`").
///
/// A derived impl supplies [`Entity::to_table`], built by reflecting
/// over the struct's `#[entity(...)]`-annotated fields, and
/// [`Entity::to_record`]/[`Entity::from_record`] for the mechanical
/// struct↔row projection spec §3 allows (explicitly not a general ORM:
/// the mapping is 1:1 on the struct's own fields, generated from the
/// same attributes that built the `Table`).
pub trait Entity: Sized {
    fn table_name() -> &'static str;
    fn to_table() -> Table;
    fn to_record(&self, table: Arc<Table>) -> Record;
    fn from_record(record: &Record) -> SchemaResult<Self>;
}
