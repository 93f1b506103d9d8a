use qtquote_rs::{Market, QtError, WatchStore, WatchUpdate};
use tempfile::TempDir;

fn store() -> (TempDir, WatchStore) {
    let dir = TempDir::new().unwrap();
    let store = WatchStore::new(dir.path().join("watch.json"));
    (dir, store)
}

#[test]
fn add_then_get_and_list() {
    let (_dir, store) = store();

    let added = store
        .add("00700", "Tencent", "waiting for a pullback", Market::Hk)
        .unwrap();
    assert_eq!(added.code, "00700");
    assert_eq!(added.reason, "waiting for a pullback");

    assert_eq!(store.get("00700", Market::Hk).unwrap(), added);
    assert_eq!(store.list().len(), 1);
}

#[test]
fn duplicate_add_is_rejected_and_leaves_one_record() {
    let (_dir, store) = store();
    store.add("00700", "Tencent", "first", Market::Hk).unwrap();

    let err = store
        .add("00700", "Tencent", "second", Market::Hk)
        .unwrap_err();
    assert!(matches!(err, QtError::AlreadyWatched));
    assert_eq!(err.to_string(), "stock already in watch list");

    let items = store.list();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].reason, "first");
}

#[test]
fn same_code_on_another_market_is_not_a_duplicate() {
    let (_dir, store) = store();
    store.add("600000", "SPDB", "a", Market::Sh).unwrap();
    store.add("600000", "SPDB", "b", Market::Sz).unwrap();
    assert_eq!(store.list().len(), 2);
}

#[test]
fn update_is_partial_and_keeps_created_at() {
    let (_dir, store) = store();
    let added = store.add("AAPL", "Apple", "earnings", Market::Us).unwrap();

    let updated = store
        .update(
            "AAPL",
            Market::Us,
            WatchUpdate {
                name: None,
                reason: Some("post-earnings drift".to_string()),
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Apple");
    assert_eq!(updated.reason, "post-earnings drift");
    assert_eq!(updated.created_at, added.created_at);
}

#[test]
fn update_on_missing_key_returns_none() {
    let (_dir, store) = store();
    let result = store
        .update("AAPL", Market::Us, WatchUpdate::default())
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn remove_reports_whether_anything_matched() {
    let (_dir, store) = store();
    store.add("AAPL", "Apple", "earnings", Market::Us).unwrap();

    assert!(store.remove("AAPL", Market::Us).unwrap());
    assert!(!store.remove("AAPL", Market::Us).unwrap());
    assert!(store.list().is_empty());
}
