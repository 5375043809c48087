use std::{sync::Arc, time::Duration};

use serde_json::json;
use tunedeck::gateway::Gateway;
use tunedeck::management::SessionStore;
use tunedeck::types::{Session, User};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_session(token: &str) -> Session {
    Session {
        token: token.to_string(),
        user: User {
            id: "u1".to_string(),
            username: "joni".to_string(),
            email: "j@x.io".to_string(),
        },
        obtained_at: 1_700_000_000,
    }
}

fn write(path: &std::path::Path, session: &Session) {
    std::fs::write(path, serde_json::to_string(session).unwrap()).unwrap();
}

#[tokio::test]
async fn test_load_missing_file_is_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::load(dir.path().join("session.json")).await;

    assert!(!store.is_signed_in());
    assert!(store.token().is_none());
}

#[tokio::test]
async fn test_load_restores_session() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    write(&file, &sample_session("tok"));

    let store = SessionStore::load(&file).await;

    assert_eq!(store.token().as_deref(), Some("tok"));
    assert_eq!(store.user().map(|u| u.username), Some("joni".to_string()));
}

#[tokio::test]
async fn test_load_discards_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    std::fs::write(&file, "{not json").unwrap();

    let store = SessionStore::load(&file).await;

    assert!(!store.is_signed_in());
    assert!(!file.exists());
}

#[tokio::test]
async fn test_sign_in_persists_and_sign_out_removes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "fresh",
            "user": {"_id": "u1", "username": "joni", "email": "j@x.io"}
        })))
        .mount(&server)
        .await;
    let gateway = Gateway::new(&format!("{}/api", server.uri()), &server.uri()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("nested").join("session.json");
    let store = SessionStore::load(&file).await;

    let session = store.sign_in(&gateway, "j@x.io", "pw").await.unwrap();
    assert_eq!(session.token, "fresh");
    assert!(file.exists());
    assert_eq!(store.token().as_deref(), Some("fresh"));

    store.sign_out().await.unwrap();
    assert!(!store.is_signed_in());
    assert!(!file.exists());

    // signing out twice is fine
    store.sign_out().await.unwrap();
}

#[tokio::test]
async fn test_failed_sign_in_keeps_previous_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})))
        .mount(&server)
        .await;
    let gateway = Gateway::new(&format!("{}/api", server.uri()), &server.uri()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    write(&file, &sample_session("old"));
    let store = SessionStore::load(&file).await;

    let err = store.sign_in(&gateway, "j@x.io", "bad").await.unwrap_err();

    assert!(err.to_string().contains("Invalid credentials"));
    assert_eq!(store.token().as_deref(), Some("old"));
    assert!(file.exists());
}

#[tokio::test]
async fn test_replace_user_updates_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    write(&file, &sample_session("tok"));
    let store = SessionStore::load(&file).await;

    let renamed = User {
        id: "u1".to_string(),
        username: "joan".to_string(),
        email: "j@x.io".to_string(),
    };
    store.replace_user(renamed).await.unwrap();

    let reloaded = SessionStore::load(&file).await;
    assert_eq!(reloaded.user().map(|u| u.username), Some("joan".to_string()));
    assert_eq!(reloaded.token().as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_sync_from_disk_publishes_external_changes() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    let store = SessionStore::load(&file).await;
    let mut rx = store.subscribe();

    assert!(!store.sync_from_disk().await);

    write(&file, &sample_session("elsewhere"));
    assert!(store.sync_from_disk().await);
    assert!(rx.has_changed().unwrap());
    assert_eq!(
        rx.borrow_and_update().as_ref().map(|s| s.token.clone()),
        Some("elsewhere".to_string())
    );

    // unchanged file: nothing published
    assert!(!store.sync_from_disk().await);
    assert!(!rx.has_changed().unwrap());

    std::fs::remove_file(&file).unwrap();
    assert!(store.sync_from_disk().await);
    assert!(rx.borrow_and_update().is_none());
}

#[tokio::test]
async fn test_sync_ignores_half_written_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    write(&file, &sample_session("tok"));
    let store = SessionStore::load(&file).await;

    std::fs::write(&file, "{\"token\":").unwrap();

    assert!(!store.sync_from_disk().await);
    assert_eq!(store.token().as_deref(), Some("tok"));
    assert!(file.exists());
}

#[tokio::test]
async fn test_watcher_notices_sign_out_elsewhere() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    write(&file, &sample_session("tok"));
    let store = Arc::new(SessionStore::load(&file).await);
    let mut rx = store.subscribe();

    let watcher = Arc::clone(&store).spawn_watcher(Duration::from_millis(20));
    std::fs::remove_file(&file).unwrap();

    tokio::time::timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("watcher did not publish in time")
        .unwrap();
    assert!(rx.borrow().is_none());
    watcher.abort();
}
