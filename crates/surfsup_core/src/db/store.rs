//! Process-wide connection factory for the climate store.
//!
//! # Responsibility
//! - Validate the store file once at startup.
//! - Hand out fresh read-only connections, one per request.
//!
//! # Invariants
//! - Returned connections are opened with `SQLITE_OPEN_READ_ONLY`.
//! - `Store` holds no open connection; it is safe to share across threads.

use super::schema::verify_schema;
use super::DbResult;
use log::{debug, error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared handle to a file-backed climate store.
///
/// Cloning is cheap; all clones point at the same database path.
#[derive(Debug, Clone)]
pub struct Store {
    path: Arc<PathBuf>,
}

impl Store {
    /// Opens the store once and verifies its schema.
    ///
    /// # Side effects
    /// - Emits `store_open` logging events with duration and status.
    ///
    /// # Errors
    /// - Returns `DbError::Sqlite` when the file cannot be opened read-only.
    /// - Returns a schema error when a required table or column is missing.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let started_at = Instant::now();
        let path = path.as_ref().to_path_buf();
        info!(
            "event=store_open module=db status=start path={}",
            path.display()
        );

        let store = Self {
            path: Arc::new(path),
        };
        let result = store
            .connect()
            .and_then(|conn| verify_schema(&conn).map(|()| conn));

        match result {
            Ok(_conn) => {
                info!(
                    "event=store_open module=db status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(store)
            }
            Err(err) => {
                error!(
                    "event=store_open module=db status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Opens a new read-only connection scoped to the caller.
    ///
    /// The connection is closed when dropped, on every exit path.
    pub fn connect(&self) -> DbResult<Connection> {
        let conn = Connection::open_with_flags(
            self.path.as_path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(Duration::from_secs(5))?;
        debug!("event=store_connect module=db status=ok");
        Ok(conn)
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}
