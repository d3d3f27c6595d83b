//! Thread-safe todo store over one shared SQLite connection.
//!
//! # Responsibility
//! - Own the single connection handle and the mutual-exclusion gate that
//!   serializes every operation on it.
//! - Expose CRUD entry points for UI/FFI callers.
//!
//! # Invariants
//! - Every operation acquires the gate before touching the connection and
//!   holds it until the operation commits or fails; guard scope releases it
//!   on all exit paths.
//! - No suspension points exist inside the critical section; operations are
//!   plain synchronous calls.
//! - SQLite does not tolerate concurrent use of one connection from several
//!   threads, so serialization here is a correctness requirement and a known
//!   throughput ceiling, not a tuning knob.

use crate::db::{open_db, open_db_in_memory};
use crate::model::todo_item::{TodoId, TodoItem};
use crate::repo::todo_repo::{
    SqliteTodoRepository, StoreError, StoreResult, TodoFilter, TodoRepository,
};
use log::{debug, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Result of a [`TodoStore::save`] call.
///
/// All variants echo the record id; `Missing` is the soft not-found signal
/// for an update whose target row no longer exists (nothing was written).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new row was inserted and assigned this fresh id.
    Created(TodoId),
    /// The existing row with this id was overwritten in place.
    Updated(TodoId),
    /// The update matched zero rows; the id refers to a deleted record.
    Missing(TodoId),
}

impl SaveOutcome {
    /// The id the operation targeted or assigned.
    pub fn id(&self) -> TodoId {
        match self {
            Self::Created(id) | Self::Updated(id) | Self::Missing(id) => *id,
        }
    }

    /// Whether the save actually wrote a row.
    pub fn wrote_row(&self) -> bool {
        !matches!(self, Self::Missing(_))
    }
}

/// Durable, thread-safe CRUD access to the `todo_items` table.
///
/// The store owns exactly one connection; callers on any thread share the
/// same instance and their operations are serialized by the internal mutex.
pub struct TodoStore {
    conn: Mutex<Connection>,
}

impl TodoStore {
    /// Opens (creating if absent) the database file and returns a ready
    /// store with all migrations applied.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = open_db(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a store over an in-memory database, for tests and smoke probes.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Returns every record, ordered by id.
    pub fn list_all(&self) -> StoreResult<Vec<TodoItem>> {
        let conn = self.lock()?;
        let items = SqliteTodoRepository::new(&conn).list(TodoFilter::All)?;
        debug!(
            "event=todo_list module=store status=ok filter=all count={}",
            items.len()
        );
        Ok(items)
    }

    /// Returns the records still pending (`done == false`), ordered by id.
    pub fn list_pending(&self) -> StoreResult<Vec<TodoItem>> {
        let conn = self.lock()?;
        let items = SqliteTodoRepository::new(&conn).list(TodoFilter::Pending)?;
        debug!(
            "event=todo_list module=store status=ok filter=pending count={}",
            items.len()
        );
        Ok(items)
    }

    /// Returns the record with the given id, or `None` when no row matches.
    pub fn get(&self, id: TodoId) -> StoreResult<Option<TodoItem>> {
        let conn = self.lock()?;
        SqliteTodoRepository::new(&conn).get(id)
    }

    /// Persists the record: unsaved items are inserted and assigned a fresh
    /// id, persisted items are overwritten in place.
    ///
    /// An update whose row has vanished reports [`SaveOutcome::Missing`]
    /// instead of pretending success; no row is written in that case.
    pub fn save(&self, item: &TodoItem) -> StoreResult<SaveOutcome> {
        let started_at = Instant::now();
        let conn = self.lock()?;
        let repo = SqliteTodoRepository::new(&conn);

        let outcome = if item.is_persisted() {
            match repo.update(item)? {
                0 => SaveOutcome::Missing(item.id),
                _ => SaveOutcome::Updated(item.id),
            }
        } else {
            SaveOutcome::Created(repo.insert(item)?)
        };

        match outcome {
            SaveOutcome::Missing(id) => warn!(
                "event=todo_save module=store status=ok outcome=missing id={id} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            SaveOutcome::Created(id) => info!(
                "event=todo_save module=store status=ok outcome=created id={id} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            SaveOutcome::Updated(id) => info!(
                "event=todo_save module=store status=ok outcome=updated id={id} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
        }

        Ok(outcome)
    }

    /// Removes the row with the given id.
    ///
    /// Returns the affected-row count: `1` when a row was removed, `0` when
    /// no row matched (not an error).
    pub fn delete(&self, id: TodoId) -> StoreResult<usize> {
        let started_at = Instant::now();
        let conn = self.lock()?;
        let removed = SqliteTodoRepository::new(&conn).delete(id)?;
        info!(
            "event=todo_delete module=store status=ok id={id} removed={removed} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(removed)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        // A poisoned gate means an operation panicked mid-flight; the
        // connection state is unknown, so the store stays unavailable until
        // the caller re-opens.
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}
