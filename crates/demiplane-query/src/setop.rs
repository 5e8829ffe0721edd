use crate::select::SelectQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOpKind {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl SetOpKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            SetOpKind::Union => "UNION",
            SetOpKind::UnionAll => "UNION ALL",
            SetOpKind::Intersect => "INTERSECT",
            SetOpKind::Except => "EXCEPT",
        }
    }
}

/// `union_(q1, q2)`, `union_all`, `intersect`, `except` (spec §4.2).
#[derive(Debug, Clone)]
pub struct SetOpQuery {
    pub kind: SetOpKind,
    pub left: Box<SelectQuery>,
    pub right: Box<SelectQuery>,
}

pub fn union_(left: SelectQuery, right: SelectQuery) -> SetOpQuery {
    SetOpQuery {
        kind: SetOpKind::Union,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn union_all(left: SelectQuery, right: SelectQuery) -> SetOpQuery {
    SetOpQuery {
        kind: SetOpKind::UnionAll,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn intersect(left: SelectQuery, right: SelectQuery) -> SetOpQuery {
    SetOpQuery {
        kind: SetOpKind::Intersect,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn except(left: SelectQuery, right: SelectQuery) -> SetOpQuery {
    SetOpQuery {
        kind: SetOpKind::Except,
        left: Box::new(left),
        right: Box::new(right),
    }
}
