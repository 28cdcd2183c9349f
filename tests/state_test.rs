use countdown_timers::state::{
    LocalStorage, StoreLock, TIMERS_KEY, load_timers, mirror_timers, with_store_lock,
};
use countdown_timers::store::{TimerFields, TimerStore};
use std::fs;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

fn fields(title: &str, duration: u32) -> TimerFields {
    TimerFields {
        title: title.to_string(),
        description: String::new(),
        duration,
        remaining_time: duration,
        is_running: false,
    }
}

#[test]
fn test_missing_or_empty_file_means_no_timers() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().join("storage.json"));
    assert!(load_timers(&storage).unwrap().timers().is_empty());

    fs::write(storage.path(), "  \n").unwrap();
    assert!(load_timers(&storage).unwrap().timers().is_empty());
}

#[test]
fn test_mirror_writes_timers_key_in_camel_case() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().join("storage.json"));

    let mut store = TimerStore::default();
    store.add_timer(fields("Tea", 180));
    mirror_timers(&storage, &store);

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(storage.path()).unwrap()).unwrap();
    let timer = &raw[TIMERS_KEY][0];
    assert_eq!(timer["id"], 1);
    assert_eq!(timer["title"], "Tea");
    assert_eq!(timer["remainingTime"], 180);
    assert_eq!(timer["isRunning"], false);

    assert_eq!(load_timers(&storage).unwrap(), store);
}

#[test]
fn test_other_keys_survive_writes() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().join("storage.json"));

    storage.set_item("theme", &"dark").unwrap();
    mirror_timers(&storage, &TimerStore::default());

    assert_eq!(
        storage.get_item::<String>("theme").unwrap().as_deref(),
        Some("dark")
    );
    storage.remove_item("theme").unwrap();
    assert!(storage.get_item::<String>("theme").unwrap().is_none());
}

#[test]
fn test_mirror_failure_is_swallowed() {
    let dir = tempdir().unwrap();
    // A directory in place of the file makes every write fail
    let blocked = dir.path().join("storage.json");
    fs::create_dir_all(&blocked).unwrap();
    let storage = LocalStorage::new(&blocked);

    let mut store = TimerStore::default();
    store.add_timer(fields("Tea", 180));
    mirror_timers(&storage, &store);

    assert!(blocked.is_dir());
}

#[test]
fn test_lock_persists_only_on_success() {
    let dir = tempdir().unwrap();
    let lock_path = dir.path().join("storage.lock");
    let storage = LocalStorage::new(dir.path().join("storage.json"));

    with_store_lock(&lock_path, &storage, |store| {
        store.add_timer(fields("kept", 10));
        Ok(())
    })
    .unwrap();

    let result: anyhow::Result<()> = with_store_lock(&lock_path, &storage, |store| {
        store.add_timer(fields("dropped", 10));
        anyhow::bail!("abort")
    });
    assert!(result.is_err());

    let store = load_timers(&storage).unwrap();
    assert_eq!(store.timers().len(), 1);
    assert_eq!(store.timers()[0].title, "kept");
}

#[test]
fn test_concurrent_lock() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().join("storage.json"));
    let lock_path = dir.path().join("storage.lock");

    let lock_path_clone = lock_path.clone();
    let storage_clone = storage.clone();

    // Hold the lock for 500ms in another thread
    let handle = thread::spawn(move || {
        with_store_lock(&lock_path_clone, &storage_clone, |store| {
            store.add_timer(fields("first", 10));
            thread::sleep(Duration::from_millis(500));
            Ok(())
        })
        .unwrap();
    });

    thread::sleep(Duration::from_millis(100));

    let start = std::time::Instant::now();
    with_store_lock(&lock_path, &storage, |store| {
        assert_eq!(store.timers().len(), 1);
        store.add_timer(fields("second", 10));
        Ok(())
    })
    .unwrap();

    assert!(
        start.elapsed().as_millis() >= 300,
        "Should have waited for lock"
    );

    handle.join().unwrap();

    let store = load_timers(&storage).unwrap();
    let ids: Vec<u32> = store.timers().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_lock_released_when_guard_dropped() {
    let dir = tempdir().unwrap();
    let lock_path = dir.path().join("nested").join("storage.lock");

    let guard = StoreLock::acquire(&lock_path).unwrap();
    assert!(lock_path.exists());
    drop(guard);

    // Re-acquiring would block forever if the first hold leaked
    let again = StoreLock::acquire(&lock_path).unwrap();
    drop(again);
}

#[test]
fn test_failed_closure_still_releases_lock() {
    let dir = tempdir().unwrap();
    let lock_path = dir.path().join("storage.lock");
    let storage = LocalStorage::new(dir.path().join("storage.json"));

    let result: anyhow::Result<()> =
        with_store_lock(&lock_path, &storage, |_| anyhow::bail!("abort"));
    assert!(result.is_err());
    assert!(!storage.path().exists());

    let count = with_store_lock(&lock_path, &storage, |store| Ok(store.timers().len())).unwrap();
    assert_eq!(count, 0);
}
