//! Read-only access to the SQLite dataset.
//!
//! Every call to [`DatasetStore::connect`] opens a fresh read-only connection.
//! Callers own the returned [`rusqlite::Connection`] for the duration of one
//! report run; dropping it closes the handle, on success and error paths alike.
//! Connections are never pooled.

pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, warn};

use crate::report::{ReportError, ReportResult};

/// Location of the dataset. Opening is deferred to [`DatasetStore::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetStore {
    path: PathBuf,
}

impl DatasetStore {
    /// Point at a SQLite database file. Does not touch the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only connection scoped to the caller.
    ///
    /// The file must already exist; it is never created. The connection is
    /// probed with a schema read so an unreadable or non-SQLite file fails
    /// here with [`ReportError::StoreUnavailable`] rather than later as a
    /// query failure.
    pub fn connect(&self) -> ReportResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&self.path, flags).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "failed to open dataset store");
            self.unavailable(e)
        })?;

        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(|e| {
                warn!(path = %self.path.display(), error = %e, "dataset store is not readable");
                self.unavailable(e)
            })?;

        debug!(path = %self.path.display(), "opened dataset store connection");
        Ok(conn)
    }

    fn unavailable(&self, source: rusqlite::Error) -> ReportError {
        ReportError::StoreUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}
