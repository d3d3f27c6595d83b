//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `todolite_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use todolite_core::{TodoItem, TodoStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("todolite_core version={}", todolite_core::core_version());

    // In-memory save/list round to validate core wiring independently from
    // Flutter/FFI runtime setup.
    let store = TodoStore::open_in_memory()?;
    let id = store.save(&TodoItem::new("smoke check"))?.id();
    let pending = store.list_pending()?;
    println!("todolite_core smoke id={id} pending={}", pending.len());

    Ok(())
}
