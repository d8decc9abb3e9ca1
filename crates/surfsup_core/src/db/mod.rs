//! SQLite store bootstrap and fixed-schema verification.
//!
//! # Responsibility
//! - Hold the process-wide connection factory for the climate store.
//! - Open read-only connections scoped to a single request.
//! - Verify the fixed `measurement`/`station` schema before serving.
//!
//! # Invariants
//! - The service never writes to the store.
//! - Every request gets its own connection; dropping it releases the handle.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod schema;
mod store;

pub use schema::verify_schema;
pub use store::Store;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    MissingTable {
        table: &'static str,
    },
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingTable { table } => write!(f, "store is missing table `{table}`"),
            Self::MissingColumn { table, column } => {
                write!(f, "store table `{table}` is missing column `{column}`")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingTable { .. } | Self::MissingColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
