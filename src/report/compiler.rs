//! Lowering of catalog descriptors into SQL and bind parameters.
//!
//! Every declared filter field becomes the optional predicate
//!
//! ```sql
//! (? = '' OR <column> LIKE ?)
//! ```
//!
//! bound to the pair `(value, "%value%")`. An empty value satisfies the
//! first disjunct and matches every row. Predicates are ANDed in canonical
//! field order, which is also the order the parameters are emitted in.

use tracing::debug;

use crate::sql::expr::{
    avg, col, count, count_distinct, count_star, lit_float, lit_str, param, paren, round, sum,
    table_col, Expr, ExprExt,
};
use crate::sql::query::{OrderByExpr, Query, SelectExpr, SortDir, TableRef};
use crate::sql::Dialect;

use super::catalog::{Aggregate, ColumnRef, Condition, Measure, QueryDescriptor, Relation};
use super::error::{ReportError, ReportResult};
use super::filter::{FilterCriteria, FilterField};

/// Escape character used when wildcard escaping is enabled.
pub const ESCAPE_CHAR: char = '\\';

/// How filter values are turned into LIKE patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Values are embedded as-is, so `%` and `_` inside a value act as
    /// wildcards.
    #[default]
    Verbatim,
    /// `%`, `_` and `\` inside a value are escaped and the predicate carries
    /// `ESCAPE '\'`, so values only ever match literally.
    Escaped,
}

impl MatchMode {
    pub fn from_escape_flag(escape_wildcards: bool) -> Self {
        if escape_wildcards {
            MatchMode::Escaped
        } else {
            MatchMode::Verbatim
        }
    }
}

/// Escape LIKE metacharacters with [`ESCAPE_CHAR`].
pub fn escape_wildcards(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | ESCAPE_CHAR) {
            out.push(ESCAPE_CHAR);
        }
        out.push(c);
    }
    out
}

/// Bind values for the declared fields: `(value, "%value%")` per field.
pub fn compile_params(
    fields: &[FilterField],
    criteria: &FilterCriteria,
    mode: MatchMode,
) -> Vec<String> {
    let mut params = Vec::with_capacity(fields.len() * 2);
    for &field in fields {
        let value = criteria.value(field);
        let needle = match mode {
            MatchMode::Verbatim => value.to_string(),
            MatchMode::Escaped => escape_wildcards(value),
        };
        params.push(value.to_string());
        params.push(format!("%{}%", needle));
    }
    params
}

/// `(? = '' OR column LIKE ?)`
pub fn filter_predicate(column: Expr, mode: MatchMode) -> Expr {
    let matches = match mode {
        MatchMode::Verbatim => column.like(param()),
        MatchMode::Escaped => column.like_escape(param(), ESCAPE_CHAR),
    };
    paren(param().eq("").or(matches))
}

fn column_expr(column: &ColumnRef) -> Expr {
    table_col(column.relation.alias(), column.name)
}

fn table_ref(relation: Relation) -> TableRef {
    TableRef::new(relation.table()).with_alias(relation.alias())
}

fn measure_expr(measure: &Measure) -> Expr {
    match measure {
        Measure::Sum(c) => sum(column_expr(c)),
        Measure::Avg(c) => avg(column_expr(c)),
        Measure::CountRows => count_star(),
        Measure::Count(c) => count(column_expr(c)),
        Measure::CountDistinct(c) => count_distinct(column_expr(c)),
        Measure::ShareOfAll { relation, places } => {
            let total = Query::new()
                .select(vec![count_star()])
                .from(TableRef::new(relation.table()));
            round(
                paren(count_star().mul(lit_float(100.0)).div(total)),
                i64::from(*places),
            )
        }
    }
}

/// Build the statement for a descriptor.
///
/// Clause order is fixed: the descriptor's own condition first, then one
/// predicate per declared filter field.
pub fn lower(descriptor: &QueryDescriptor, mode: MatchMode) -> Query {
    let mut select: Vec<SelectExpr> = Vec::new();
    if let Some(group) = &descriptor.group {
        select.push(column_expr(&group.column).alias(group.alias));
    }
    match descriptor.aggregate {
        Aggregate::Measures(measures) => {
            select.extend(measures.iter().map(|m| measure_expr(&m.measure).alias(m.alias)));
        }
        Aggregate::Project(columns) => {
            select.extend(columns.iter().map(|c| column_expr(c).alias(c.name)));
        }
    }

    let join = descriptor.join;
    let mut query = Query::new().select(select).from(table_ref(join.root()));

    for step in join.steps() {
        query = query.join(
            step.kind,
            table_ref(step.relation),
            column_expr(&step.left).eq(column_expr(&step.right)),
        );
    }

    if let Some(Condition::Equals(column, literal)) = &descriptor.condition {
        query = query.filter(column_expr(column).eq(lit_str(literal)));
    }

    for &field in descriptor.filter_fields() {
        // Signatures only declare fields the join shape can map.
        if let Some(column) = join.filter_column(field) {
            query = query.filter(filter_predicate(column_expr(&column), mode));
        }
    }

    if let Some(group) = &descriptor.group {
        query = query.group_by(vec![column_expr(&group.column)]);
    }

    if let Some(order) = &descriptor.order {
        let mut order_by = vec![OrderByExpr::new(col(order.column), order.dir)];
        if let Some(group) = &descriptor.group {
            order_by.push(OrderByExpr::new(column_expr(&group.column), SortDir::Asc));
        }
        query = query.order_by(order_by);
    }

    query
}

/// A report lowered to a statement plus its bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledReport {
    pub descriptor: &'static QueryDescriptor,
    pub query: Query,
    pub params: Vec<String>,
}

impl CompiledReport {
    /// Rendered SQL for a dialect.
    pub fn sql(&self, dialect: Dialect) -> String {
        self.query.to_sql(dialect)
    }

    /// Number of placeholders in the statement.
    pub fn placeholder_count(&self) -> usize {
        self.query.param_count()
    }
}

/// Lower a descriptor and compile its parameters.
///
/// Fails with [`ReportError::FilterArityMismatch`] if the statement's
/// placeholders and the compiled parameters disagree.
pub fn compile(
    descriptor: &'static QueryDescriptor,
    criteria: &FilterCriteria,
    mode: MatchMode,
) -> ReportResult<CompiledReport> {
    let query = lower(descriptor, mode);
    let params = compile_params(descriptor.filter_fields(), criteria, mode);
    check_arity(descriptor.id, query.param_count(), params.len())?;

    debug!(
        report = descriptor.id,
        params = params.len(),
        active = criteria.active_fields().len(),
        "compiled report"
    );

    Ok(CompiledReport {
        descriptor,
        query,
        params,
    })
}

pub(crate) fn check_arity(report: &str, expected: usize, actual: usize) -> ReportResult<()> {
    if expected != actual {
        return Err(ReportError::FilterArityMismatch {
            report: report.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}
