//! # Surplus
//!
//! Parameterized analytical reports over a food-donation dataset.
//!
//! ## Architecture
//!
//! A fixed catalog of report descriptors is lowered through a typed SQL
//! builder and executed against a read-only SQLite store:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            Report Catalog (QueryDescriptor)              │
//! │   (join shape, group key, measures, filter signature)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compiler]  ◄── FilterCriteria
//! ┌─────────────────────────────────────────────────────────┐
//! │          Query (SQL builder) + bind parameters           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [engine]
//! ┌─────────────────────────────────────────────────────────┐
//! │        DatasetStore (read-only SQLite connection)        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │               QueryResult (columns, rows)                │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use surplus::prelude::*;
//!
//! let engine = ReportEngine::new(DatasetStore::new("food_wastage.db"));
//! let criteria = FilterCriteria::new().with_location("Austin");
//! let result = engine.run_report("Most Common Food Types", &criteria)?;
//! println!("{}", render(&result, OutputFormat::Table)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod report;
pub mod sql;
pub mod store;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{Settings, SettingsError};
    pub use crate::report::{
        render, FilterCriteria, FilterField, MatchMode, OutputFormat, QueryResult, ReportEngine,
        ReportError, ReportResult, Value,
    };
    pub use crate::sql::Dialect;
    pub use crate::store::DatasetStore;
}

pub use report::{FilterCriteria, QueryResult, ReportEngine, ReportError};
pub use store::DatasetStore;
