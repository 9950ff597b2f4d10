//! SQLite storage bootstrap for persisted editor sessions.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the session store.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No session row is read or written before migrations succeed.
//! - A failed migration rolls back; `user_version` keeps its prior value.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Session store bootstrap/transport failure.
#[derive(Debug)]
pub enum DbError {
    /// Opening, configuring or querying the connection failed.
    Connection(rusqlite::Error),
    /// The file was written by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// Migration `version` could not be applied.
    MigrationFailed {
        version: u32,
        source: rusqlite::Error,
    },
}

impl DbError {
    /// Schema version involved in the failure, when there is one.
    pub fn schema_version(&self) -> Option<u32> {
        match self {
            Self::Connection(_) => None,
            Self::SchemaTooNew { found, .. } => Some(*found),
            Self::MigrationFailed { version, .. } => Some(*version),
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(err) => write!(f, "session store connection error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "session store schema v{found} was written by a newer build (supports up to v{supported})"
            ),
            Self::MigrationFailed { version, source } => {
                write!(f, "session store migration v{version} failed: {source}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection(err) | Self::MigrationFailed { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Connection(value)
    }
}
