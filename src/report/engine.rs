//! Report execution against the dataset store.

use std::time::Instant;

use rusqlite::params_from_iter;
use tracing::{debug, info};

use crate::sql::Dialect;
use crate::store::DatasetStore;

use super::catalog::{self, QueryDescriptor};
use super::compiler::{self, check_arity, CompiledReport, MatchMode};
use super::error::{ReportError, ReportResult};
use super::filter::{FilterCriteria, FilterField};
use super::result::{QueryResult, Value};

/// Resolves, compiles and runs catalog reports.
///
/// The engine holds no connection. Each [`run_report`](Self::run_report)
/// opens its own read-only connection and drops it before returning, so
/// repeated calls always see the current contents of the store.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    store: DatasetStore,
    match_mode: MatchMode,
}

impl ReportEngine {
    pub fn new(store: DatasetStore) -> Self {
        Self {
            store,
            match_mode: MatchMode::default(),
        }
    }

    /// Use the given LIKE pattern construction for filter values.
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Report ids in catalog order.
    pub fn list_reports(&self) -> Vec<&'static str> {
        catalog::list_reports()
    }

    /// Resolve a report by id, alias or key.
    pub fn describe(&self, report: &str) -> ReportResult<&'static QueryDescriptor> {
        catalog::lookup(report)
    }

    /// Filter fields a report consumes, in canonical order.
    pub fn filter_fields_for(&self, report: &str) -> ReportResult<&'static [FilterField]> {
        catalog::filter_fields_for(report)
    }

    /// Compile a report without touching the store.
    pub fn compile(&self, report: &str, criteria: &FilterCriteria) -> ReportResult<CompiledReport> {
        let descriptor = catalog::lookup(report)?;
        compiler::compile(descriptor, criteria, self.match_mode)
    }

    /// Run a report and materialize every row.
    ///
    /// Filter values for fields the report does not declare are ignored.
    pub fn run_report(&self, report: &str, criteria: &FilterCriteria) -> ReportResult<QueryResult> {
        let compiled = self.compile(report, criteria)?;
        let id = compiled.descriptor.id;
        let sql = compiled.sql(Dialect::Sqlite);
        debug!(report = id, params = compiled.params.len(), sql = %sql, "executing report");

        let started = Instant::now();
        let conn = self.store.connect()?;

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| ReportError::query_failure(id, e))?;
        check_arity(id, stmt.parameter_count(), compiled.params.len())?;

        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = names.len();

        let mut rows = stmt
            .query(params_from_iter(compiled.params.iter()))
            .map_err(|e| ReportError::query_failure(id, e))?;

        let mut materialized = Vec::new();
        while let Some(row) = rows.next().map_err(|e| ReportError::query_failure(id, e))? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                let value = row
                    .get_ref(i)
                    .map_err(|e| ReportError::query_failure(id, e))?;
                values.push(Value::from(value));
            }
            materialized.push(values);
        }

        let result = QueryResult::new(names, materialized);
        info!(
            report = id,
            rows = result.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "report complete"
        );
        Ok(result)
    }
}
