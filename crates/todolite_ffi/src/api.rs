//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level todo functions to Dart via FRB.
//! - Hold the single process-wide store so exactly one connection exists.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - List/get results are plain immutable snapshots; the UI layer owns all
//!   presentation formatting.

use log::warn;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use todolite_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, SaveOutcome, TodoItem,
    TodoStore,
};

const DB_FILE_NAME: &str = "todolite.db3";

static STORE: OnceCell<StoreState> = OnceCell::new();

struct StoreState {
    db_path: PathBuf,
    store: TodoStore,
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One todo row as the UI binds it (`name` + `done` drive the list cell).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItemView {
    pub id: i64,
    pub name: String,
    pub notes: String,
    pub done: bool,
}

/// Result envelope for `todo_open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoOpenResponse {
    /// Whether the store is open and usable after this call.
    pub ok: bool,
    /// Full path of the backing database file when `ok`.
    pub db_path: Option<String>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Result envelope for list calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    pub ok: bool,
    /// Snapshot rows; empty on failure.
    pub items: Vec<TodoItemView>,
    pub message: String,
}

/// Result envelope for `todo_get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoGetResponse {
    pub ok: bool,
    /// The matching row, or `None` when the id does not exist (soft miss).
    pub item: Option<TodoItemView>,
    pub message: String,
}

/// Result envelope for `todo_save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoSaveResponse {
    pub ok: bool,
    /// Assigned or echoed record id when `ok`.
    pub id: Option<i64>,
    /// `false` when the update targeted an id that no longer exists.
    pub wrote_row: bool,
    pub message: String,
}

/// Result envelope for `todo_delete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDeleteResponse {
    pub ok: bool,
    /// Affected-row count: `1` when a row was removed, `0` for a soft miss.
    pub removed: u32,
    pub message: String,
}

/// Opens the process-wide todo store under the platform-resolved data
/// directory supplied by the host app.
///
/// # FFI contract
/// - Sync call; creates the database file on first use.
/// - Idempotent for the same directory; re-opening at a different directory
///   is rejected.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_open(db_dir: String) -> TodoOpenResponse {
    let trimmed = db_dir.trim();
    if trimmed.is_empty() {
        return TodoOpenResponse {
            ok: false,
            db_path: None,
            message: "todo_open failed: db_dir cannot be empty".to_string(),
        };
    }
    let db_path = Path::new(trimmed).join(DB_FILE_NAME);

    let result = STORE.get_or_try_init(|| -> Result<StoreState, String> {
        let store = TodoStore::open(&db_path)
            .map_err(|err| format!("todo_open failed: {err}"))?;
        Ok(StoreState {
            db_path: db_path.clone(),
            store,
        })
    });

    match result {
        Ok(state) if state.db_path == db_path => TodoOpenResponse {
            ok: true,
            db_path: Some(state.db_path.display().to_string()),
            message: "Store open.".to_string(),
        },
        Ok(state) => {
            warn!(
                "event=todo_open module=ffi status=rejected requested={} active={}",
                db_path.display(),
                state.db_path.display()
            );
            TodoOpenResponse {
                ok: false,
                db_path: Some(state.db_path.display().to_string()),
                message: format!(
                    "todo_open failed: store already open at `{}`",
                    state.db_path.display()
                ),
            }
        }
        Err(message) => TodoOpenResponse {
            ok: false,
            db_path: None,
            message,
        },
    }
}

/// Lists every stored todo.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures produce an empty list with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list_all() -> TodoListResponse {
    list_with(|store| store.list_all())
}

/// Lists only todos that are not done yet.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures produce an empty list with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list_pending() -> TodoListResponse {
    list_with(|store| store.list_pending())
}

/// Fetches one todo by id.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - A missing id is `ok=true` with `item=None`, not a failure.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_get(id: i64) -> TodoGetResponse {
    match with_store(|store| store.get(id)) {
        Ok(Some(item)) => TodoGetResponse {
            ok: true,
            item: Some(to_view(item)),
            message: "Found.".to_string(),
        },
        Ok(None) => TodoGetResponse {
            ok: true,
            item: None,
            message: "No such todo.".to_string(),
        },
        Err(message) => TodoGetResponse {
            ok: false,
            item: None,
            message,
        },
    }
}

/// Saves a todo: `id == 0` inserts and assigns a fresh id, a nonzero id
/// overwrites the matching row.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - An update whose row has vanished returns `ok=true, wrote_row=false`
///   with the echoed id, so the UI can distinguish the stale-row case.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_save(id: i64, name: String, notes: String, done: bool) -> TodoSaveResponse {
    let item = TodoItem {
        id,
        name,
        notes,
        done,
    };

    match with_store(|store| store.save(&item)) {
        Ok(outcome) => TodoSaveResponse {
            ok: true,
            id: Some(outcome.id()),
            wrote_row: outcome.wrote_row(),
            message: match outcome {
                SaveOutcome::Created(_) => "Todo created.".to_string(),
                SaveOutcome::Updated(_) => "Todo updated.".to_string(),
                SaveOutcome::Missing(_) => "Todo no longer exists.".to_string(),
            },
        },
        Err(message) => TodoSaveResponse {
            ok: false,
            id: None,
            wrote_row: false,
            message,
        },
    }
}

/// Deletes a todo by id.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - A missing id is `ok=true, removed=0`, not a failure.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(id: i64) -> TodoDeleteResponse {
    match with_store(|store| store.delete(id)) {
        Ok(removed) => TodoDeleteResponse {
            ok: true,
            removed: removed as u32,
            message: if removed == 0 {
                "No such todo.".to_string()
            } else {
                "Todo deleted.".to_string()
            },
        },
        Err(message) => TodoDeleteResponse {
            ok: false,
            removed: 0,
            message,
        },
    }
}

fn list_with(
    f: impl FnOnce(&TodoStore) -> todolite_core::StoreResult<Vec<TodoItem>>,
) -> TodoListResponse {
    match with_store(f) {
        Ok(items) => {
            let items = items.into_iter().map(to_view).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No todos.".to_string()
            } else {
                format!("Found {} todo(s).", items.len())
            };
            TodoListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(message) => TodoListResponse {
            ok: false,
            items: Vec::new(),
            message,
        },
    }
}

fn with_store<T>(
    f: impl FnOnce(&TodoStore) -> todolite_core::StoreResult<T>,
) -> Result<T, String> {
    let state = STORE
        .get()
        .ok_or_else(|| "store not opened; call todo_open first".to_string())?;
    f(&state.store).map_err(|err| err.to_string())
}

fn to_view(item: TodoItem) -> TodoItemView {
    TodoItemView {
        id: item.id,
        name: item.name,
        notes: item.notes,
        done: item.done,
    }
}
