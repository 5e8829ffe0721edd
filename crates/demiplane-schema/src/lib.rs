//! The runtime schema model: [`Table`], [`FieldSchema`], [`Record`],
//! [`Field`], and typed column references (spec §3, §4.1).

mod column;
mod entity;
mod error;
mod record;
mod table;
mod value;

pub use column::{AllColumns, DynamicColumn, TableColumn, TableHandle};
pub use demiplane_gears::EntityDescriptor;
pub use demiplane_gears_macros::Entity;
pub use entity::Entity as EntityTrait;
pub use error::{SchemaError, SchemaResult};
pub use record::{Field, Record};
pub use table::{FieldSchema, Table};
pub use value::{FieldValue, FromFieldValue, IntoFieldValue};
