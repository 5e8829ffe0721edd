use demiplane_schema::{AllColumns, DynamicColumn, FieldValue, TableColumn};

use crate::select::SelectQuery;

/// One operand in the expression tree (spec §4.2 "Expression DSL").
///
/// A single enum stands in for the five compile-time "category concepts"
/// (`IsSelectExpression`, `IsWhereExpression`, …) of the original: Rust
/// has no zero-cost analogue to C++ concepts applied per-AST-node short
/// of heavy const-generic/macro machinery, so category membership is
/// checked structurally by the compiler instead (e.g. an aggregate
/// reached through a `WHERE` tree is rejected there, not by the type
/// system at the call site — see `demiplane_query::compiler`).
#[derive(Debug, Clone)]
pub enum Expr {
    Column(DynamicColumn),
    AllColumns(AllColumns),
    Literal(FieldValue),
    Aggregate(AggregateKind, Option<Box<Expr>>),
    Case(CaseExpr),
    Scalar(Box<SelectQuery>),
    Aliased(Box<Expr>, String),
}

impl Expr {
    pub fn aliased(self, alias: impl Into<String>) -> Expr {
        Expr::Aliased(Box::new(self), alias.into())
    }

    pub(crate) fn is_aggregate(&self) -> bool {
        match self {
            Expr::Aggregate(..) => true,
            Expr::Aliased(inner, _) => inner.is_aggregate(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    Count,
    CountDistinct,
    Sum,
    Avg,
    Min,
    Max,
}

#[derive(Debug, Clone)]
pub struct CaseExpr {
    pub arms: Vec<(crate::condition::Condition, Expr)>,
    pub else_: Option<Box<Expr>>,
}

impl<T: 'static> From<&TableColumn<T>> for Expr {
    fn from(col: &TableColumn<T>) -> Self {
        Expr::Column(DynamicColumn::from(col))
    }
}

impl From<DynamicColumn> for Expr {
    fn from(col: DynamicColumn) -> Self {
        Expr::Column(col)
    }
}

impl From<AllColumns> for Expr {
    fn from(all: AllColumns) -> Self {
        Expr::AllColumns(all)
    }
}

impl From<FieldValue> for Expr {
    fn from(value: FieldValue) -> Self {
        Expr::Literal(value)
    }
}

macro_rules! impl_expr_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Expr {
                fn from(v: $ty) -> Self {
                    Expr::Literal(demiplane_schema::IntoFieldValue::into_field_value(v))
                }
            }
        )*
    };
}
impl_expr_from_scalar!(bool, i32, i64, f32, f64, String);

impl From<&str> for Expr {
    fn from(v: &str) -> Self {
        Expr::Literal(FieldValue::Text(v.to_string().into()))
    }
}

/// `count(col | *)` (spec §4.2 "Aggregate constructors").
pub fn count(expr: impl Into<Expr>) -> Expr {
    Expr::Aggregate(AggregateKind::Count, Some(Box::new(expr.into())))
}

pub fn count_star() -> Expr {
    Expr::Aggregate(AggregateKind::Count, None)
}

pub fn count_distinct(expr: impl Into<Expr>) -> Expr {
    Expr::Aggregate(AggregateKind::CountDistinct, Some(Box::new(expr.into())))
}

pub fn sum(expr: impl Into<Expr>) -> Expr {
    Expr::Aggregate(AggregateKind::Sum, Some(Box::new(expr.into())))
}

pub fn avg(expr: impl Into<Expr>) -> Expr {
    Expr::Aggregate(AggregateKind::Avg, Some(Box::new(expr.into())))
}

pub fn min(expr: impl Into<Expr>) -> Expr {
    Expr::Aggregate(AggregateKind::Min, Some(Box::new(expr.into())))
}

pub fn max(expr: impl Into<Expr>) -> Expr {
    Expr::Aggregate(AggregateKind::Max, Some(Box::new(expr.into())))
}

/// `case_().when(cond, result)….else_(result)` (spec §4.2 "CASE constructor").
#[derive(Debug, Clone, Default)]
pub struct CaseBuilder {
    arms: Vec<(crate::condition::Condition, Expr)>,
    else_: Option<Box<Expr>>,
}

pub fn case_() -> CaseBuilder {
    CaseBuilder::default()
}

impl CaseBuilder {
    pub fn when(mut self, cond: crate::condition::Condition, result: impl Into<Expr>) -> Self {
        self.arms.push((cond, result.into()));
        self
    }

    pub fn else_(mut self, result: impl Into<Expr>) -> Self {
        self.else_ = Some(Box::new(result.into()));
        self
    }

    pub fn build(self) -> Expr {
        Expr::Case(CaseExpr {
            arms: self.arms,
            else_: self.else_,
        })
    }
}
