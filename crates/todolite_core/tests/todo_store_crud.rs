use todolite_core::{SaveOutcome, TodoItem, TodoStore};

#[test]
fn first_save_assigns_fresh_positive_ids() {
    let store = TodoStore::open_in_memory().unwrap();

    let first = store.save(&TodoItem::new("one")).unwrap();
    let second = store.save(&TodoItem::new("two")).unwrap();

    assert_eq!(first, SaveOutcome::Created(1));
    assert_eq!(second, SaveOutcome::Created(2));
    assert!(first.id() > 0);
    assert_ne!(first.id(), second.id());
}

#[test]
fn get_after_save_returns_equal_record() {
    let store = TodoStore::open_in_memory().unwrap();

    let mut item = TodoItem::new("Learn X");
    item.notes = "Attend Y".to_string();
    item.done = true;

    let id = store.save(&item).unwrap().id();
    let loaded = store.get(id).unwrap().unwrap();

    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, item.name);
    assert_eq!(loaded.notes, item.notes);
    assert_eq!(loaded.done, item.done);
}

#[test]
fn resave_updates_in_place_without_adding_rows() {
    let store = TodoStore::open_in_memory().unwrap();

    let id = store.save(&TodoItem::new("draft")).unwrap().id();
    store.save(&TodoItem::new("other")).unwrap();

    let updated = TodoItem {
        id,
        name: "final".to_string(),
        notes: "rewritten".to_string(),
        done: true,
    };
    assert_eq!(store.save(&updated).unwrap(), SaveOutcome::Updated(id));

    let all = store.list_all().unwrap();
    assert_eq!(all.len(), 2);

    let loaded = store.get(id).unwrap().unwrap();
    assert_eq!(loaded.name, "final");
    assert_eq!(loaded.notes, "rewritten");
    assert!(loaded.done);
}

#[test]
fn save_against_vanished_id_reports_missing_and_writes_nothing() {
    let store = TodoStore::open_in_memory().unwrap();

    let id = store.save(&TodoItem::new("ephemeral")).unwrap().id();
    assert_eq!(store.delete(id).unwrap(), 1);

    let ghost = TodoItem {
        id,
        name: "ghost".to_string(),
        notes: String::new(),
        done: false,
    };
    let outcome = store.save(&ghost).unwrap();

    assert_eq!(outcome, SaveOutcome::Missing(id));
    assert_eq!(outcome.id(), id);
    assert!(!outcome.wrote_row());
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn delete_reports_affected_row_count() {
    let store = TodoStore::open_in_memory().unwrap();

    let id = store.save(&TodoItem::new("to remove")).unwrap().id();

    assert_eq!(store.delete(9999).unwrap(), 0);
    assert_eq!(store.list_all().unwrap().len(), 1);

    assert_eq!(store.delete(id).unwrap(), 1);
    assert!(store.get(id).unwrap().is_none());
    assert_eq!(store.delete(id).unwrap(), 0);
}

#[test]
fn get_missing_id_is_none_not_error() {
    let store = TodoStore::open_in_memory().unwrap();

    assert!(store.get(42).unwrap().is_none());
}

#[test]
fn list_pending_is_the_not_done_subset_of_list_all() {
    let store = TodoStore::open_in_memory().unwrap();

    let mut groceries = TodoItem::new("groceries");
    groceries.mark_done();
    store.save(&groceries).unwrap();
    store.save(&TodoItem::new("laundry")).unwrap();
    let mut taxes = TodoItem::new("taxes");
    taxes.notes = "before April".to_string();
    store.save(&taxes).unwrap();

    let all = store.list_all().unwrap();
    let pending = store.list_pending().unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|item| !item.done));

    let expected: Vec<_> = all.iter().filter(|item| !item.done).cloned().collect();
    assert_eq!(pending, expected);
}

#[test]
fn list_order_is_stable_for_a_given_table_state() {
    let store = TodoStore::open_in_memory().unwrap();

    store.save(&TodoItem::new("c")).unwrap();
    store.save(&TodoItem::new("a")).unwrap();
    store.save(&TodoItem::new("b")).unwrap();

    let first_read = store.list_all().unwrap();
    let second_read = store.list_all().unwrap();
    assert_eq!(first_read, second_read);

    let ids: Vec<_> = first_read.iter().map(|item| item.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn insert_delete_scenario_leaves_exactly_the_second_item() {
    let store = TodoStore::open_in_memory().unwrap();

    let mut first = TodoItem::new("Learn X");
    first.notes = "Attend Y".to_string();
    first.done = true;
    assert_eq!(store.save(&first).unwrap(), SaveOutcome::Created(1));

    let second = TodoItem::new("Ship Z");
    assert_eq!(store.save(&second).unwrap(), SaveOutcome::Created(2));

    let loaded = store.get(1).unwrap().unwrap();
    assert_eq!(loaded.name, "Learn X");
    assert_eq!(loaded.notes, "Attend Y");
    assert!(loaded.done);

    assert_eq!(store.delete(1).unwrap(), 1);
    assert!(store.get(1).unwrap().is_none());

    let remaining = store.list_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 2);
    assert_eq!(remaining[0].name, "Ship Z");
}

#[test]
fn store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todolite.db3");

    let id = {
        let store = TodoStore::open(&path).unwrap();
        store.save(&TodoItem::new("durable")).unwrap().id()
    };

    let reopened = TodoStore::open(&path).unwrap();
    let loaded = reopened.get(id).unwrap().unwrap();
    assert_eq!(loaded.name, "durable");
}

#[test]
fn open_fails_when_path_cannot_be_created() {
    let dir = tempfile::tempdir().unwrap();
    // Parent directory does not exist and SQLite will not create it.
    let path = dir.path().join("missing-subdir").join("todolite.db3");

    assert!(TodoStore::open(&path).is_err());
}
