//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for todo records.
//! - Isolate SQL text and row mapping from the store.
//!
//! # Invariants
//! - Absence of a matching row is reported softly (options and affected-row
//!   counts), never as an error.

pub mod todo_repo;
