//! SQLite SQL dialect.
//!
//! SQLite features relevant to report queries:
//! - ANSI identifier quoting (`"`)
//! - Anonymous `?` bind parameters
//! - `LIKE` is case-insensitive for ASCII characters by default

use super::helpers;
use super::SqlDialect;

/// SQLite SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn placeholder(&self, ordinal: usize) -> String {
        helpers::placeholder_anonymous(ordinal)
    }
}
