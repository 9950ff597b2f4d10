//! Session repository contract, SQLite and in-memory implementations.
//!
//! # Invariants
//! - The session lives under the single key [`SESSION_STATE_KEY`].
//! - `load` returns `Ok(None)` on first run, never a synthesized default.

use crate::db::DbError;
use crate::model::note::EditorSessionState;
use rusqlite::{params, Connection};
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the serialized session record.
pub const SESSION_STATE_KEY: &str = "appState";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure reported by a session repository.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialization(serde_json::Error),
    /// Backing store cannot be reached at all.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "invalid session record: {err}"),
            Self::Unavailable(message) => write!(f, "session store unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Connection(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Load/save contract used by the editor service.
pub trait SessionRepository {
    /// Returns the stored session, or `None` when nothing was saved yet.
    fn load(&self) -> RepoResult<Option<EditorSessionState>>;
    /// Replaces the stored session with `state`.
    fn save(&self, state: &EditorSessionState) -> RepoResult<()>;
}

/// SQLite-backed session repository owning its connection.
pub struct SqliteSessionRepository {
    conn: Connection,
}

impl SqliteSessionRepository {
    /// Wraps a migrated connection, checking the session table exists.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'app_state'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::Unavailable(
                "missing required table `app_state`".to_string(),
            ));
        }
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SessionRepository for SqliteSessionRepository {
    fn load(&self) -> RepoResult<Option<EditorSessionState>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM app_state WHERE key = ?1;")?;
        let mut rows = stmt.query([SESSION_STATE_KEY])?;
        if let Some(row) = rows.next()? {
            let value: String = row.get("value")?;
            return Ok(Some(serde_json::from_str(&value)?));
        }
        Ok(None)
    }

    fn save(&self, state: &EditorSessionState) -> RepoResult<()> {
        let value = serde_json::to_string(state)?;
        self.conn.execute(
            "INSERT INTO app_state (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![SESSION_STATE_KEY, value],
        )?;
        Ok(())
    }
}

/// Process-local repository holding the serialized record in memory.
///
/// Goes through the same JSON encoding as SQLite; `set_available(false)`
/// makes every call fail with `Unavailable`.
#[derive(Debug)]
pub struct InMemorySessionRepository {
    record: RefCell<Option<String>>,
    available: Cell<bool>,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self {
            record: RefCell::new(None),
            available: Cell::new(true),
        }
    }
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with a raw JSON record.
    pub fn with_record(record: impl Into<String>) -> Self {
        let repo = Self::default();
        repo.record.replace(Some(record.into()));
        repo
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Raw JSON currently stored.
    pub fn record(&self) -> Option<String> {
        self.record.borrow().clone()
    }

    fn ensure_available(&self) -> RepoResult<()> {
        if self.available.get() {
            Ok(())
        } else {
            Err(RepoError::Unavailable("in-memory store offline".to_string()))
        }
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn load(&self) -> RepoResult<Option<EditorSessionState>> {
        self.ensure_available()?;
        match self.record.borrow().as_deref() {
            Some(value) => Ok(Some(serde_json::from_str(value)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &EditorSessionState) -> RepoResult<()> {
        self.ensure_available()?;
        let value = serde_json::to_string(state)?;
        self.record.replace(Some(value));
        Ok(())
    }
}
