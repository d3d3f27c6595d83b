//! TodoItem domain model.
//!
//! # Responsibility
//! - Define the single record type persisted by the store.
//! - Provide lifecycle helpers around the persisted/unpersisted boundary.
//!
//! # Invariants
//! - `id == UNSAVED_ID` means the record has never been written to storage.
//! - The store is the only party that assigns nonzero ids.

use serde::{Deserialize, Serialize};

/// Row identifier assigned by SQLite `AUTOINCREMENT` on first save.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TodoId = i64;

/// Sentinel id for records that have not been persisted yet.
pub const UNSAVED_ID: TodoId = 0;

/// One todo record as the UI sees it: a title, free-form notes and a
/// completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Storage-assigned id; `UNSAVED_ID` until the first save.
    pub id: TodoId,
    /// Display title. Arbitrary text, no uniqueness constraint.
    pub name: String,
    /// Free-form notes; empty string when the user entered none.
    #[serde(default)]
    pub notes: String,
    /// Completion flag; new records start out pending.
    #[serde(default)]
    pub done: bool,
}

impl TodoItem {
    /// Creates an unpersisted record with the given title.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            notes: String::new(),
            done: false,
        }
    }

    /// Returns whether this record has been written to storage.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }

    /// Marks the record as completed.
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Puts a completed record back into the pending set.
    pub fn reopen(&mut self) {
        self.done = false;
    }
}
