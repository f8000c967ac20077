//! PostgreSQL SQL dialect.
//!
//! PostgreSQL features:
//! - ANSI identifier quoting (`"`)
//! - Numbered `$n` bind parameters
//! - `LIKE` is case-sensitive, so substring filters render as `ILIKE`

use super::helpers;
use super::SqlDialect;

/// PostgreSQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn placeholder(&self, ordinal: usize) -> String {
        helpers::placeholder_dollar(ordinal)
    }

    fn case_insensitive_like(&self) -> &'static str {
        "ILIKE"
    }
}
