use crate::condition::{CompareOp, Condition};
use crate::delete::DeleteQuery;
use crate::dialect::SqlDialect;
use crate::error::{CompileError, CompileResult};
use crate::expr::{AggregateKind, CaseExpr, Expr};
use crate::insert::InsertQuery;
use crate::join::Join;
use crate::select::{OrderDirection, SelectQuery};
use crate::setop::SetOpQuery;
use crate::update::UpdateQuery;

/// A dialect-specific SQL string with placeholders, paired with the
/// parameter packet populated in that dialect's native binding
/// representation (spec §4.3).
#[derive(Debug, Clone)]
pub struct CompiledQuery<P> {
    pub sql: String,
    pub packet: P,
}

/// Walks a query AST for one dialect, emitting SQL tokens and pushing
/// literals into the dialect's parameter packet (spec §4.3
/// "QueryVisitor").
pub struct QueryVisitor<'d, D: SqlDialect> {
    dialect: &'d D,
    buf: String,
    packet: D::Packet,
}

impl<'d, D: SqlDialect> QueryVisitor<'d, D> {
    pub fn new(dialect: &'d D) -> Self {
        QueryVisitor {
            dialect,
            buf: String::new(),
            packet: dialect.make_param_sink(),
        }
    }

    fn finish(self) -> CompiledQuery<D::Packet> {
        CompiledQuery {
            sql: self.buf,
            packet: self.packet,
        }
    }

    fn quoted_table(&mut self, table: &demiplane_schema::Table) {
        self.buf.push_str(&self.dialect.quote_identifier(table.name()));
    }

    fn write_expr(&mut self, expr: &Expr) -> CompileResult<()> {
        match expr {
            Expr::Column(col) => {
                self.buf.push_str(&self.dialect.quote_identifier(col.table.name()));
                self.buf.push('.');
                self.buf.push_str(&self.dialect.quote_identifier(&col.name));
            }
            Expr::AllColumns(all) => {
                self.buf.push_str(&self.dialect.quote_identifier(all.table.name()));
                self.buf.push_str(".*");
            }
            Expr::Literal(value) => {
                let idx = self.packet.push(value);
                self.buf.push_str(&self.dialect.placeholder(idx));
            }
            Expr::Aggregate(kind, arg) => self.write_aggregate(*kind, arg.as_deref())?,
            Expr::Case(case_expr) => self.write_case(case_expr)?,
            Expr::Scalar(subquery) => {
                if subquery.projection.len() != 1 {
                    return Err(CompileError::ShapeMismatch(
                        "a subquery used as a scalar must project exactly one column".to_string(),
                    ));
                }
                self.buf.push('(');
                self.write_select(subquery)?;
                self.buf.push(')');
            }
            Expr::Aliased(inner, alias) => {
                self.write_expr(inner)?;
                self.buf.push_str(" AS ");
                self.buf.push_str(&self.dialect.quote_identifier(alias));
            }
        }
        Ok(())
    }

    fn write_aggregate(&mut self, kind: AggregateKind, arg: Option<&Expr>) -> CompileResult<()> {
        let name = match kind {
            AggregateKind::Count | AggregateKind::CountDistinct => "COUNT",
            AggregateKind::Sum => "SUM",
            AggregateKind::Avg => "AVG",
            AggregateKind::Min => "MIN",
            AggregateKind::Max => "MAX",
        };
        self.buf.push_str(name);
        self.buf.push('(');
        if kind == AggregateKind::CountDistinct {
            self.buf.push_str("DISTINCT ");
        }
        match arg {
            Some(expr) => self.write_expr(expr)?,
            None => self.buf.push('*'),
        }
        self.buf.push(')');
        Ok(())
    }

    fn write_case(&mut self, case_expr: &CaseExpr) -> CompileResult<()> {
        self.buf.push_str("CASE");
        for (cond, result) in &case_expr.arms {
            self.buf.push_str(" WHEN ");
            self.write_condition(cond)?;
            self.buf.push_str(" THEN ");
            self.write_expr(result)?;
        }
        if let Some(else_) = &case_expr.else_ {
            self.buf.push_str(" ELSE ");
            self.write_expr(else_)?;
        }
        self.buf.push_str(" END");
        Ok(())
    }

    fn write_condition(&mut self, cond: &Condition) -> CompileResult<()> {
        match cond {
            Condition::Compare(lhs, op, rhs) => {
                self.write_expr(lhs)?;
                self.buf.push(' ');
                self.buf.push_str(op_sql(*op));
                self.buf.push(' ');
                self.write_expr(rhs)?;
            }
            Condition::And(lhs, rhs) => {
                self.buf.push('(');
                self.write_condition(lhs)?;
                self.buf.push_str(" AND ");
                self.write_condition(rhs)?;
                self.buf.push(')');
            }
            Condition::Or(lhs, rhs) => {
                self.buf.push('(');
                self.write_condition(lhs)?;
                self.buf.push_str(" OR ");
                self.write_condition(rhs)?;
                self.buf.push(')');
            }
            Condition::Not(inner) => {
                self.buf.push_str("NOT (");
                self.write_condition(inner)?;
                self.buf.push(')');
            }
            Condition::Exists(subquery) => {
                self.buf.push_str("EXISTS (");
                self.write_select(subquery)?;
                self.buf.push(')');
            }
            Condition::NotExists(subquery) => {
                self.buf.push_str("NOT EXISTS (");
                self.write_select(subquery)?;
                self.buf.push(')');
            }
            Condition::InSubquery(expr, subquery) => {
                if subquery.projection.len() != 1 {
                    return Err(CompileError::ShapeMismatch(
                        "a subquery used with IN must project exactly one column".to_string(),
                    ));
                }
                self.write_expr(expr)?;
                self.buf.push_str(" IN (");
                self.write_select(subquery)?;
                self.buf.push(')');
            }
            Condition::InList(expr, values) => {
                self.write_expr(expr)?;
                self.buf.push_str(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        self.buf.push_str(", ");
                    }
                    let idx = self.packet.push(value);
                    self.buf.push_str(&self.dialect.placeholder(idx));
                }
                self.buf.push(')');
            }
            Condition::Between(expr, lo, hi) => {
                self.write_expr(expr)?;
                self.buf.push_str(" BETWEEN ");
                self.write_expr(lo)?;
                self.buf.push_str(" AND ");
                self.write_expr(hi)?;
            }
            Condition::IsNull(expr) => {
                self.write_expr(expr)?;
                self.buf.push_str(" IS NULL");
            }
            Condition::IsNotNull(expr) => {
                self.write_expr(expr)?;
                self.buf.push_str(" IS NOT NULL");
            }
        }
        Ok(())
    }

    fn write_join(&mut self, join: &Join) -> CompileResult<()> {
        self.buf.push(' ');
        self.buf.push_str(join.kind.as_sql());
        self.buf.push(' ');
        self.quoted_table(&join.table);
        self.buf.push_str(" ON ");
        self.write_condition(&join.on)
    }

    fn write_select(&mut self, query: &SelectQuery) -> CompileResult<()> {
        if !query.ctes.is_empty() {
            if !self.dialect.supports_cte() {
                return Err(CompileError::UnsupportedFeature("CTE"));
            }
            self.buf.push_str("WITH ");
            for (i, cte) in query.ctes.iter().enumerate() {
                if i > 0 {
                    self.buf.push_str(", ");
                }
                self.buf.push_str(&self.dialect.quote_identifier(&cte.alias));
                self.buf.push_str(" AS (");
                self.write_select(&cte.query)?;
                self.buf.push(')');
            }
            self.buf.push(' ');
        }

        self.buf.push_str("SELECT ");
        if query.distinct {
            self.buf.push_str("DISTINCT ");
        }
        if query.projection.is_empty() {
            self.buf.push('*');
        } else {
            for (i, expr) in query.projection.iter().enumerate() {
                if i > 0 {
                    self.buf.push_str(", ");
                }
                self.write_expr(expr)?;
            }
        }
        self.buf.push_str(" FROM ");
        self.quoted_table(&query.from);

        for join in &query.joins {
            self.write_join(join)?;
        }

        if let Some(where_) = &query.where_ {
            if where_.contains_aggregate() {
                return Err(CompileError::UnsupportedFeature("aggregate expression in WHERE"));
            }
            self.buf.push_str(" WHERE ");
            self.write_condition(where_)?;
        }

        if !query.group_by.is_empty() {
            self.buf.push_str(" GROUP BY ");
            for (i, expr) in query.group_by.iter().enumerate() {
                if i > 0 {
                    self.buf.push_str(", ");
                }
                self.write_expr(expr)?;
            }
        }

        if let Some(having) = &query.having {
            if !having.contains_aggregate() {
                return Err(CompileError::UnsupportedFeature("HAVING requires an aggregate expression"));
            }
            self.buf.push_str(" HAVING ");
            self.write_condition(having)?;
        }

        if !query.order_by.is_empty() {
            self.buf.push_str(" ORDER BY ");
            for (i, (expr, dir)) in query.order_by.iter().enumerate() {
                if i > 0 {
                    self.buf.push_str(", ");
                }
                self.write_expr(expr)?;
                self.buf.push_str(match dir {
                    OrderDirection::Asc => " ASC",
                    OrderDirection::Desc => " DESC",
                });
            }
        }

        if query.limit.is_some() || query.offset.is_some() {
            self.buf.push(' ');
            self.buf.push_str(&self.dialect.limit_clause(query.limit, query.offset));
        }

        Ok(())
    }

    fn write_setop(&mut self, query: &SetOpQuery) -> CompileResult<()> {
        self.buf.push('(');
        self.write_select(&query.left)?;
        self.buf.push(')');
        self.buf.push(' ');
        self.buf.push_str(query.kind.as_sql());
        self.buf.push(' ');
        self.buf.push('(');
        self.write_select(&query.right)?;
        self.buf.push(')');
        Ok(())
    }

    fn write_insert(&mut self, query: &InsertQuery) -> CompileResult<()> {
        query.validate()?;
        self.buf.push_str("INSERT INTO ");
        self.quoted_table(&query.table);
        self.buf.push_str(" (");
        for (i, col) in query.columns.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            self.buf.push_str(&self.dialect.quote_identifier(col));
        }
        self.buf.push_str(") VALUES ");
        for (i, row) in query.rows.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            self.buf.push('(');
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    self.buf.push_str(", ");
                }
                let idx = self.packet.push(value);
                self.buf.push_str(&self.dialect.placeholder(idx));
            }
            self.buf.push(')');
        }
        if query.returning {
            if !self.dialect.supports_returning() {
                return Err(CompileError::UnsupportedFeature("RETURNING"));
            }
            self.buf.push_str(" RETURNING *");
        }
        Ok(())
    }

    fn write_update(&mut self, query: &UpdateQuery) -> CompileResult<()> {
        self.buf.push_str("UPDATE ");
        self.quoted_table(&query.table);
        self.buf.push_str(" SET ");
        for (i, (col, value)) in query.assignments.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            self.buf.push_str(&self.dialect.quote_identifier(col));
            self.buf.push_str(" = ");
            self.write_expr(value)?;
        }
        if let Some(where_) = &query.where_ {
            self.buf.push_str(" WHERE ");
            self.write_condition(where_)?;
        }
        Ok(())
    }

    fn write_delete(&mut self, query: &DeleteQuery) -> CompileResult<()> {
        self.buf.push_str("DELETE FROM ");
        self.quoted_table(&query.table);
        if let Some(where_) = &query.where_ {
            self.buf.push_str(" WHERE ");
            self.write_condition(where_)?;
        }
        Ok(())
    }
}

fn op_sql(op: CompareOp) -> &'static str {
    op.as_sql()
}

pub fn compile_select<D: SqlDialect>(dialect: &D, query: &SelectQuery) -> CompileResult<CompiledQuery<D::Packet>> {
    let mut visitor = QueryVisitor::new(dialect);
    visitor.write_select(query)?;
    Ok(visitor.finish())
}

pub fn compile_setop<D: SqlDialect>(dialect: &D, query: &SetOpQuery) -> CompileResult<CompiledQuery<D::Packet>> {
    let mut visitor = QueryVisitor::new(dialect);
    visitor.write_setop(query)?;
    Ok(visitor.finish())
}

pub fn compile_insert<D: SqlDialect>(dialect: &D, query: &InsertQuery) -> CompileResult<CompiledQuery<D::Packet>> {
    let mut visitor = QueryVisitor::new(dialect);
    visitor.write_insert(query)?;
    Ok(visitor.finish())
}

pub fn compile_update<D: SqlDialect>(dialect: &D, query: &UpdateQuery) -> CompileResult<CompiledQuery<D::Packet>> {
    let mut visitor = QueryVisitor::new(dialect);
    visitor.write_update(query)?;
    Ok(visitor.finish())
}

pub fn compile_delete<D: SqlDialect>(dialect: &D, query: &DeleteQuery) -> CompileResult<CompiledQuery<D::Packet>> {
    let mut visitor = QueryVisitor::new(dialect);
    visitor.write_delete(query)?;
    Ok(visitor.finish())
}
