use tunedeck::error::StoreError;
use tunedeck::management::LikeStore;
use tunedeck::player::LikeSet;

#[test]
fn test_like_set_toggle_and_order() {
    let mut likes = LikeSet::new();

    assert!(likes.toggle("b"));
    assert!(likes.toggle("a"));
    assert!(likes.contains("a"));
    assert_eq!(likes.ids(), ["b", "a"]);

    assert!(!likes.toggle("b"));
    assert_eq!(likes.ids(), ["a"]);
    assert!(!likes.remove("missing"));
}

#[test]
fn test_like_set_from_ids_drops_duplicates() {
    let likes = LikeSet::from_ids(["x", "y", "x"].map(String::from));
    assert_eq!(likes.len(), 2);
    assert_eq!(likes.ids(), ["x", "y"]);
}

#[tokio::test]
async fn test_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = LikeStore::new(dir.path().join("state").join("likes.json"));

    let likes = store.load().await.unwrap();
    assert!(likes.is_empty());
}

#[tokio::test]
async fn test_persist_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = LikeStore::new(dir.path().join("state").join("likes.json"));

    let mut likes = LikeSet::new();
    likes.toggle("s2");
    likes.toggle("s1");
    store.persist(&likes).await.unwrap();

    assert!(store.path().exists());
    assert_eq!(store.load().await.unwrap(), likes);

    store.clear().await.unwrap();
    assert!(store.load().await.unwrap().is_empty());
    store.clear().await.unwrap();
}

#[tokio::test]
async fn test_forget_removes_deleted_song() {
    let dir = tempfile::tempdir().unwrap();
    let store = LikeStore::new(dir.path().join("likes.json"));
    store
        .persist(&LikeSet::from_ids(["s1", "s2"].map(String::from)))
        .await
        .unwrap();

    assert!(store.forget("s1").await.unwrap());
    assert_eq!(store.load().await.unwrap().ids(), ["s2"]);

    assert!(!store.forget("s1").await.unwrap());
    assert_eq!(store.load().await.unwrap().ids(), ["s2"]);
}

#[tokio::test]
async fn test_forget_without_file_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = LikeStore::new(dir.path().join("likes.json"));

    assert!(!store.forget("s1").await.unwrap());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("likes.json");
    std::fs::write(&path, "{\"a\":1}").unwrap();

    let err = LikeStore::new(&path).load().await.unwrap_err();
    assert!(matches!(err, StoreError::Serde(_)));
}
