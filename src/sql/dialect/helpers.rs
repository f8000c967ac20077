//! Shared helper functions for SQL dialect implementations.
//!
//! This module provides reusable building blocks that dialects can compose
//! to implement the `SqlDialect` trait with minimal duplication.

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
/// Used by: SQLite, Postgres
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

// =============================================================================
// String Quoting
// =============================================================================

/// Quote string with single quotes (standard SQL).
/// Used by: All dialects
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

// =============================================================================
// Bind Parameters
// =============================================================================

/// Anonymous positional parameter.
/// Used by: SQLite
pub fn placeholder_anonymous(_ordinal: usize) -> String {
    "?".to_string()
}

/// Numbered parameter (`$1`, `$2`, ...).
/// Used by: Postgres
pub fn placeholder_dollar(ordinal: usize) -> String {
    format!("${}", ordinal)
}
