use demiplane_schema::TableHandle;

use crate::condition::Condition;

/// `delete_from(table).where(cond)` (spec §4.2).
#[derive(Debug, Clone)]
pub struct DeleteQuery {
    pub(crate) table: TableHandle,
    pub(crate) where_: Option<Condition>,
}

pub fn delete_from(table: TableHandle) -> DeleteQuery {
    DeleteQuery { table, where_: None }
}

impl DeleteQuery {
    pub fn where_(mut self, cond: Condition) -> Self {
        self.where_ = Some(cond);
        self
    }
}
