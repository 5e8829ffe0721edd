use demiplane_schema::TableHandle;

use crate::condition::Condition;
use crate::expr::Expr;

/// `update(table).set(col, value)… .where(cond)` (spec §4.2).
#[derive(Debug, Clone)]
pub struct UpdateQuery {
    pub(crate) table: TableHandle,
    pub(crate) assignments: Vec<(String, Expr)>,
    pub(crate) where_: Option<Condition>,
}

pub fn update(table: TableHandle) -> UpdateQuery {
    UpdateQuery {
        table,
        assignments: Vec::new(),
        where_: None,
    }
}

impl UpdateQuery {
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.assignments.push((column.into(), value.into()));
        self
    }

    pub fn set_many(mut self, assignments: Vec<(String, Expr)>) -> Self {
        self.assignments.extend(assignments);
        self
    }

    pub fn where_(mut self, cond: Condition) -> Self {
        self.where_ = Some(cond);
        self
    }
}
