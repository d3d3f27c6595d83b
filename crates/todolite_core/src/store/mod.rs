//! Durable todo storage behind a single serialized connection.
//!
//! # Responsibility
//! - Own the one connection/lock pair used for all todo persistence.
//!
//! # Invariants
//! - At most one database operation is in flight per store instance.

pub mod todo_store;
