//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `todo_items` table against a borrowed connection.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it.
//! - "Not found" is never an error: reads yield `None`, mutations yield a
//!   zero affected-row count.

use crate::db::DbError;
use crate::model::todo_item::{TodoId, TodoItem};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TODO_SELECT_SQL: &str = "SELECT id, name, notes, done FROM todo_items";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure classes surfaced by todo persistence.
///
/// `Unavailable` and `Poisoned` both mean the backing storage can no longer
/// be used and the caller must re-open; `Constraint` means SQLite refused a
/// mutation and nothing was written.
#[derive(Debug)]
pub enum StoreError {
    /// The connection could not be opened or stopped working.
    Unavailable(DbError),
    /// A previous operation panicked while holding the store lock.
    Poisoned,
    /// The mutation would break a schema constraint; no rows were changed.
    Constraint(String),
    /// A persisted row could not be decoded into a `TodoItem`.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::Poisoned => write!(
                f,
                "store lock poisoned by an earlier panic; re-open the store"
            ),
            Self::Constraint(message) => write!(f, "constraint violation: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) => Some(err),
            Self::Poisoned | Self::Constraint(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Unavailable(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        let is_constraint = matches!(
            &value,
            rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
        );
        if is_constraint {
            Self::Constraint(value.to_string())
        } else {
            Self::Unavailable(DbError::Sqlite(value))
        }
    }
}

/// Row subset selected by list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoFilter {
    /// Every record in the table.
    #[default]
    All,
    /// Only records with `done == false`.
    Pending,
}

/// Data access contract for todo records.
pub trait TodoRepository {
    fn insert(&self, item: &TodoItem) -> StoreResult<TodoId>;
    /// Returns the affected-row count: `0` when no row matches `item.id`.
    fn update(&self, item: &TodoItem) -> StoreResult<usize>;
    fn get(&self, id: TodoId) -> StoreResult<Option<TodoItem>>;
    fn list(&self, filter: TodoFilter) -> StoreResult<Vec<TodoItem>>;
    /// Returns the affected-row count: `0` when no row matches `id`.
    fn delete(&self, id: TodoId) -> StoreResult<usize>;
}

/// SQLite-backed todo repository over a borrowed connection.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn insert(&self, item: &TodoItem) -> StoreResult<TodoId> {
        self.conn.execute(
            "INSERT INTO todo_items (name, notes, done) VALUES (?1, ?2, ?3);",
            params![
                item.name.as_str(),
                item.notes.as_str(),
                bool_to_int(item.done)
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, item: &TodoItem) -> StoreResult<usize> {
        let changed = self.conn.execute(
            "UPDATE todo_items SET name = ?1, notes = ?2, done = ?3 WHERE id = ?4;",
            params![
                item.name.as_str(),
                item.notes.as_str(),
                bool_to_int(item.done),
                item.id
            ],
        )?;

        Ok(changed)
    }

    fn get(&self, id: TodoId) -> StoreResult<Option<TodoItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_todo_row(row)?)),
            None => Ok(None),
        }
    }

    fn list(&self, filter: TodoFilter) -> StoreResult<Vec<TodoItem>> {
        let sql = match filter {
            TodoFilter::All => format!("{TODO_SELECT_SQL} ORDER BY id ASC;"),
            TodoFilter::Pending => {
                format!("{TODO_SELECT_SQL} WHERE done = 0 ORDER BY id ASC;")
            }
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_todo_row(row)?);
        }

        Ok(items)
    }

    fn delete(&self, id: TodoId) -> StoreResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM todo_items WHERE id = ?1;", params![id])?;

        Ok(changed)
    }
}

fn parse_todo_row(row: &Row<'_>) -> StoreResult<TodoItem> {
    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid done value `{other}` in todo_items.done"
            )));
        }
    };

    Ok(TodoItem {
        id: row.get("id")?,
        name: row.get("name")?,
        notes: row.get("notes")?,
        done,
    })
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

#[cfg(test)]
mod tests {
    use super::StoreError;
    use rusqlite::ffi;

    #[test]
    fn constraint_failures_map_to_constraint_class() {
        let sqlite_err = rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_CONSTRAINT_PRIMARYKEY),
            Some("UNIQUE constraint failed: todo_items.id".to_string()),
        );

        match StoreError::from(sqlite_err) {
            StoreError::Constraint(message) => assert!(message.contains("UNIQUE")),
            other => panic!("unexpected error class: {other}"),
        }
    }

    #[test]
    fn io_failures_map_to_unavailable_class() {
        let sqlite_err =
            rusqlite::Error::SqliteFailure(ffi::Error::new(ffi::SQLITE_IOERR), None);

        assert!(matches!(
            StoreError::from(sqlite_err),
            StoreError::Unavailable(_)
        ));
    }
}
