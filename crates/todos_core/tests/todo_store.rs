use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use todos_core::{SaveOutcome, StoreError, Todo, TodoStore, TodosConfig};

fn due(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, hour, 0, 0).unwrap()
}

fn todo(id: &str, title: &str) -> Todo {
    Todo::with_id(id, title, due(9)).unwrap()
}

fn store_in(dir: &TempDir) -> TodoStore {
    TodoStore::load(dir.path().join("todos.json"))
}

fn ids(store: &TodoStore) -> Vec<&str> {
    store.todos().iter().map(|todo| todo.id.as_str()).collect()
}

fn file_json(path: &Path) -> serde_json::Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn load_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert!(store.is_empty());
    assert!(!store.path().exists());
}

#[test]
fn load_malformed_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    fs::write(&path, b"{ not json").unwrap();

    let store = TodoStore::load(&path);
    assert!(store.is_empty());
    assert_eq!(fs::read(&path).unwrap(), b"{ not json");
}

#[test]
fn load_file_with_invalid_record_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    fs::write(
        &path,
        r#"[{"title":"x","due":"2026-06-01T09:00:00Z","shouldNotify":false,"id":" "}]"#,
    )
    .unwrap();

    assert!(TodoStore::load(&path).is_empty());
}

#[test]
fn save_then_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);

    let mut record = todo("1", "Buy milk");
    record.memo = Some("oat".to_string());
    record.should_notify = true;
    assert_eq!(store.save(record.clone()).unwrap(), SaveOutcome::Inserted);

    let reloaded = store_in(&dir);
    assert_eq!(reloaded.todos(), &[record]);
}

#[test]
fn save_creates_missing_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("app").join("todos.json");
    let mut store = TodoStore::load(&path);

    store.save(todo("1", "first")).unwrap();
    assert!(path.exists());
}

#[test]
fn save_appends_in_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);

    let mut late = todo("a", "late");
    late.due = due(23);
    store.save(late).unwrap();
    store.save(todo("b", "early")).unwrap();
    store.save(todo("c", "middle")).unwrap();

    assert_eq!(ids(&store), vec!["a", "b", "c"]);
    assert_eq!(ids(&store_in(&dir)), vec!["a", "b", "c"]);
}

#[test]
fn save_existing_id_replaces_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    store.save(todo("a", "first")).unwrap();
    store.save(todo("b", "second")).unwrap();
    store.save(todo("c", "third")).unwrap();

    let mut edited = todo("b", "second, edited");
    edited.due = due(18);
    assert_eq!(store.save(edited.clone()).unwrap(), SaveOutcome::Replaced);

    assert_eq!(store.len(), 3);
    assert_eq!(ids(&store), vec!["a", "b", "c"]);
    assert_eq!(store.get("b"), Some(&edited));

    let reloaded = store_in(&dir);
    assert_eq!(reloaded.todos()[1], edited);
}

#[test]
fn save_rejects_invalid_record_without_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);

    let mut invalid = todo("1", "x");
    invalid.id = String::new();
    let err = store.save(invalid).unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert!(store.is_empty());
    assert!(!store.path().exists());
}

#[test]
fn file_is_json_array_of_collection() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    store.save(todo("1", "one")).unwrap();
    store.save(todo("2", "two")).unwrap();

    let json = file_json(store.path());
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "1");
    assert_eq!(items[1]["title"], "two");
    assert_eq!(items[1]["shouldNotify"], false);
}

#[test]
fn remove_then_lookup_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    store.save(todo("1", "one")).unwrap();
    store.save(todo("2", "two")).unwrap();

    let removed = store.remove("1").unwrap();
    assert_eq!(removed.title, "one");
    assert!(store.get("1").is_none());
    assert_eq!(ids(&store_in(&dir)), vec!["2"]);
}

#[test]
fn remove_missing_id_is_not_found_and_leaves_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    store.save(todo("1", "one")).unwrap();
    let before = fs::read(store.path()).unwrap();

    let err = store.remove("nope").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref id) if id == "nope"));
    assert_eq!(fs::read(store.path()).unwrap(), before);
    assert_eq!(store.len(), 1);
}

#[test]
fn remove_on_empty_store_does_not_create_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    assert!(matches!(store.remove("1"), Err(StoreError::NotFound(_))));
    assert!(!store.path().exists());
}

#[test]
fn failed_write_rolls_back_insert() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();
    let mut store = TodoStore::load(blocker.join("todos.json"));

    let err = store.save(todo("1", "one")).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(store.is_empty());
    assert!(store.get("1").is_none());
}

#[test]
fn failed_write_rolls_back_replace_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let mut store = TodoStore::load(data_dir.join("todos.json"));
    store.save(todo("1", "original")).unwrap();
    store.save(todo("2", "second")).unwrap();

    fs::remove_dir_all(&data_dir).unwrap();
    fs::write(&data_dir, b"now a file").unwrap();

    let err = store.save(todo("1", "edited")).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert_eq!(store.get("1").unwrap().title, "original");

    let err = store.remove("1").unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert_eq!(ids(&store), vec!["1", "2"]);
}

#[test]
fn load_drops_duplicate_ids_keeping_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    fs::write(
        &path,
        r#"[
            {"title":"first","due":"2026-06-01T09:00:00Z","shouldNotify":false,"id":"1"},
            {"title":"other","due":"2026-06-01T09:00:00Z","shouldNotify":false,"id":"2"},
            {"title":"dup","due":"2026-06-01T09:00:00Z","shouldNotify":true,"id":"1"}
        ]"#,
    )
    .unwrap();

    let store = TodoStore::load(&path);
    assert_eq!(ids(&store), vec!["1", "2"]);
    assert_eq!(store.get("1").unwrap().title, "first");
}

#[test]
fn open_default_uses_configured_store_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = TodosConfig::with_data_dir(dir.path());
    let mut store = TodoStore::open_default(&config);
    store.save(todo("1", "one")).unwrap();

    assert_eq!(store.path(), dir.path().join("todos.json"));
    assert_eq!(TodoStore::open_default(&config).len(), 1);
}

#[test]
fn save_leaves_no_temp_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    store.save(todo("1", "one")).unwrap();
    store.save(todo("1", "one again")).unwrap();
    store.remove("1").unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("todos.json")]);
    assert_eq!(file_json(store.path()), serde_json::json!([]));
}
