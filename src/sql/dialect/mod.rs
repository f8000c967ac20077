//! SQL Dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for SQL dialect differences.
//! Each dialect implements `SqlDialect` to handle its specific syntax:
//!
//! - Identifier quoting
//! - Positional bind parameters: `?` (SQLite) vs `$1` (PostgreSQL)
//! - Case-insensitive substring match: `LIKE` (SQLite) vs `ILIKE` (PostgreSQL)
//!
//! # Usage
//!
//! ```ignore
//! use surplus::sql::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::Sqlite;
//! let quoted = dialect.quote_identifier("Claims");  // "Claims"
//! ```
//!
//! SQLite is the only dialect reports execute against. PostgreSQL exists so
//! the catalog can be rendered for a server-hosted copy of the dataset.

pub mod helpers;
mod postgres;
mod sqlite;

pub use postgres::Postgres;
pub use sqlite::Sqlite;

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    /// Quote an identifier (table, column, alias).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal.
    ///
    /// All supported dialects use single quotes with `''` for escaping.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    /// Render the positional bind parameter with the given 1-based ordinal.
    fn placeholder(&self, ordinal: usize) -> String;

    /// Keyword for a substring match that ignores ASCII case.
    ///
    /// SQLite's `LIKE` already folds ASCII case; PostgreSQL needs `ILIKE`.
    fn case_insensitive_like(&self) -> &'static str {
        "LIKE"
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Sqlite,
    Postgres,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Sqlite => &Sqlite,
            Dialect::Postgres => &Postgres,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn placeholder(&self, ordinal: usize) -> String {
        self.dialect().placeholder(ordinal)
    }

    fn case_insensitive_like(&self) -> &'static str {
        self.dialect().case_insensitive_like()
    }
}
