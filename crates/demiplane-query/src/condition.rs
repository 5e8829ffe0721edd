use demiplane_schema::FieldValue;

use crate::expr::Expr;
use crate::select::SelectQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// A boolean predicate tree — the `IsCondition` category of spec §4.2:
/// binary comparison, unary boolean, logical AND/OR, EXISTS, IN, BETWEEN,
/// subquery.
#[derive(Debug, Clone)]
pub enum Condition {
    Compare(Box<Expr>, CompareOp, Box<Expr>),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Not(Box<Condition>),
    Exists(Box<SelectQuery>),
    NotExists(Box<SelectQuery>),
    InSubquery(Box<Expr>, Box<SelectQuery>),
    InList(Box<Expr>, Vec<FieldValue>),
    Between(Box<Expr>, Box<Expr>, Box<Expr>),
    IsNull(Box<Expr>),
    IsNotNull(Box<Expr>),
}

impl Condition {
    pub fn and(self, other: Condition) -> Condition {
        Condition::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Condition) -> Condition {
        Condition::Or(Box::new(self), Box::new(other))
    }

    pub fn not(self) -> Condition {
        Condition::Not(Box::new(self))
    }

    pub(crate) fn contains_aggregate(&self) -> bool {
        match self {
            Condition::Compare(l, _, r) => l.is_aggregate() || r.is_aggregate(),
            Condition::And(l, r) | Condition::Or(l, r) => l.contains_aggregate() || r.contains_aggregate(),
            Condition::Not(c) => c.contains_aggregate(),
            Condition::InSubquery(e, _) | Condition::IsNull(e) | Condition::IsNotNull(e) => e.is_aggregate(),
            Condition::InList(e, _) => e.is_aggregate(),
            Condition::Between(e, lo, hi) => e.is_aggregate() || lo.is_aggregate() || hi.is_aggregate(),
            Condition::Exists(_) | Condition::NotExists(_) => false,
        }
    }
}

fn cmp(op: CompareOp, lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Condition {
    Condition::Compare(Box::new(lhs.into()), op, Box::new(rhs.into()))
}

pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Condition {
    cmp(CompareOp::Eq, lhs, rhs)
}
pub fn ne(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Condition {
    cmp(CompareOp::Ne, lhs, rhs)
}
pub fn lt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Condition {
    cmp(CompareOp::Lt, lhs, rhs)
}
pub fn le(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Condition {
    cmp(CompareOp::Le, lhs, rhs)
}
pub fn gt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Condition {
    cmp(CompareOp::Gt, lhs, rhs)
}
pub fn ge(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Condition {
    cmp(CompareOp::Ge, lhs, rhs)
}

pub fn is_null(expr: impl Into<Expr>) -> Condition {
    Condition::IsNull(Box::new(expr.into()))
}

pub fn is_not_null(expr: impl Into<Expr>) -> Condition {
    Condition::IsNotNull(Box::new(expr.into()))
}

pub fn and_(lhs: Condition, rhs: Condition) -> Condition {
    lhs.and(rhs)
}

pub fn or_(lhs: Condition, rhs: Condition) -> Condition {
    lhs.or(rhs)
}

pub fn not_(cond: Condition) -> Condition {
    cond.not()
}

pub fn exists(subquery: SelectQuery) -> Condition {
    Condition::Exists(Box::new(subquery))
}

pub fn not_exists(subquery: SelectQuery) -> Condition {
    Condition::NotExists(Box::new(subquery))
}

/// `in_(col, subquery | {literal-list})` (spec §4.2).
pub fn in_subquery(expr: impl Into<Expr>, subquery: SelectQuery) -> Condition {
    Condition::InSubquery(Box::new(expr.into()), Box::new(subquery))
}

pub fn in_list(expr: impl Into<Expr>, values: Vec<FieldValue>) -> Condition {
    Condition::InList(Box::new(expr.into()), values)
}

pub fn between(expr: impl Into<Expr>, lo: impl Into<Expr>, hi: impl Into<Expr>) -> Condition {
    Condition::Between(Box::new(expr.into()), Box::new(lo.into()), Box::new(hi.into()))
}
