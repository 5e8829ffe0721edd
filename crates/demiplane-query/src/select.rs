use demiplane_schema::TableHandle;

use crate::condition::Condition;
use crate::expr::Expr;
use crate::join::{Join, JoinKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// `select(cols…)` before `.from(table)` has supplied the relation the
/// projection is read against (spec §4.2).
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    distinct: bool,
    projection: Vec<Expr>,
}

pub fn select(projection: Vec<Expr>) -> SelectBuilder {
    SelectBuilder {
        distinct: false,
        projection,
    }
}

impl SelectBuilder {
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn from(self, table: TableHandle) -> SelectQuery {
        SelectQuery {
            distinct: self.distinct,
            projection: self.projection,
            from: table,
            joins: Vec::new(),
            where_: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
            ctes: Vec::new(),
        }
    }
}

/// One `WITH alias AS (select-expr)` entry (spec §4.2 "CTEs").
#[derive(Debug, Clone)]
pub struct CommonTableExpr {
    pub alias: String,
    pub query: SelectQuery,
}

/// A fully-shaped `SELECT`, ready to compile (spec §4.2, §4.3 "Emission order").
#[derive(Debug, Clone)]
pub struct SelectQuery {
    pub(crate) distinct: bool,
    pub(crate) projection: Vec<Expr>,
    pub(crate) from: TableHandle,
    pub(crate) joins: Vec<Join>,
    pub(crate) where_: Option<Condition>,
    pub(crate) group_by: Vec<Expr>,
    pub(crate) having: Option<Condition>,
    pub(crate) order_by: Vec<(Expr, OrderDirection)>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) ctes: Vec<CommonTableExpr>,
}

impl SelectQuery {
    pub fn join(mut self, table: TableHandle, on: Condition) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Inner,
            table,
            on,
        });
        self
    }

    pub fn left_join(mut self, table: TableHandle, on: Condition) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Left,
            table,
            on,
        });
        self
    }

    pub fn right_join(mut self, table: TableHandle, on: Condition) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Right,
            table,
            on,
        });
        self
    }

    pub fn full_join(mut self, table: TableHandle, on: Condition) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Full,
            table,
            on,
        });
        self
    }

    pub fn where_(mut self, cond: Condition) -> Self {
        self.where_ = Some(cond);
        self
    }

    pub fn group_by(mut self, cols: Vec<Expr>) -> Self {
        self.group_by = cols;
        self
    }

    pub fn having(mut self, cond: Condition) -> Self {
        self.having = Some(cond);
        self
    }

    pub fn order_by(mut self, expr: Expr, direction: OrderDirection) -> Self {
        self.order_by.push((expr, direction));
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, k: u64) -> Self {
        self.offset = Some(k);
        self
    }

    pub fn with(mut self, alias: impl Into<String>, query: SelectQuery) -> Self {
        self.ctes.push(CommonTableExpr {
            alias: alias.into(),
            query,
        });
        self
    }
}

/// Entry point for `with(alias, select-expr)....then(final-query)`
/// (spec §4.2 "CTEs").
pub fn with(alias: impl Into<String>, query: SelectQuery) -> WithBuilder {
    WithBuilder {
        ctes: vec![CommonTableExpr {
            alias: alias.into(),
            query,
        }],
    }
}

pub struct WithBuilder {
    ctes: Vec<CommonTableExpr>,
}

impl WithBuilder {
    pub fn with(mut self, alias: impl Into<String>, query: SelectQuery) -> Self {
        self.ctes.push(CommonTableExpr {
            alias: alias.into(),
            query,
        });
        self
    }

    pub fn then(self, mut final_query: SelectQuery) -> SelectQuery {
        let mut ctes = self.ctes;
        ctes.append(&mut final_query.ctes);
        final_query.ctes = ctes;
        final_query
    }
}
