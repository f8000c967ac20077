//! Parameterized reports over the food-donation dataset.
//!
//! - [`catalog`] - the fixed set of report descriptors
//! - [`filter`] - caller-supplied filter criteria
//! - [`compiler`] - descriptor lowering and bind parameter compilation
//! - [`engine`] - execution against the store
//! - [`result`] / [`render`] - materialized rows and their text forms

pub mod catalog;
pub mod compiler;
pub mod engine;
pub mod error;
pub mod filter;
pub mod render;
pub mod result;

pub use catalog::{FilterSignature, QueryDescriptor, CATALOG};
pub use compiler::{CompiledReport, MatchMode};
pub use engine::ReportEngine;
pub use error::{ReportError, ReportResult};
pub use filter::{FilterCriteria, FilterField};
pub use render::{render, OutputFormat};
pub use result::{Column, QueryResult, Value, ValueKind};
