//! Gateway tests against a mock backend.

use serde_json::json;
use tunedeck::error::GatewayError;
use tunedeck::gateway::{AUTH_HEADER, Gateway};
use tunedeck::types::{PlaylistDraft, ProfileUpdate, Registration, SongUpload, TrackPatch};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn gateway(server: &MockServer) -> Gateway {
    Gateway::new(&format!("{}/api", server.uri()), "http://media.test").unwrap()
}

async fn signed_in(server: &MockServer) -> Gateway {
    gateway(server).await.with_token(Some("tok-1".to_string()))
}

mod songs {
    use super::*;

    #[tokio::test]
    async fn test_list_songs_normalizes_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "s1", "title": "One", "audioUrl": "uploads/1.mp3"},
                {"id": "s2", "name": "Two", "url": "https://cdn.test/2.mp3"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let songs = gateway(&server).await.list_songs().await.unwrap();

        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].audio_url.as_deref(), Some("http://media.test/uploads/1.mp3"));
        assert_eq!(songs[1].title, "Two");
    }

    #[tokio::test]
    async fn test_list_songs_sends_token_when_signed_in() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .and(header(AUTH_HEADER, "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"songs": []})))
            .expect(1)
            .mount(&server)
            .await;

        let songs = signed_in(&server).await.list_songs().await.unwrap();
        assert!(songs.is_empty());
    }

    #[tokio::test]
    async fn test_update_song_keeps_requested_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/songs/s1"))
            .and(body_json(json!({"title": "Renamed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "Renamed"})))
            .mount(&server)
            .await;

        let patch = TrackPatch {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let song = gateway(&server).await.update_song("s1", &patch).await.unwrap();

        assert_eq!(song.id, "s1");
        assert_eq!(song.title, "Renamed");
    }

    #[tokio::test]
    async fn test_delete_song_accepts_plain_text() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/songs/s1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("deleted"))
            .mount(&server)
            .await;

        assert!(gateway(&server).await.delete_song("s1").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_song_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/songs/zz"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Song not found"})))
            .mount(&server)
            .await;

        let err = gateway(&server).await.delete_song("zz").await.unwrap_err();
        match err {
            GatewayError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Song not found");
            }
            other => panic!("Expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upload_song_posts_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/songs/upload"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "uploaded",
                "songs": [{"_id": "new", "title": "track", "audioUrl": "/uploads/track.mp3"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("track.mp3");
        std::fs::write(&file, b"ID3fake").unwrap();

        let upload = SongUpload {
            audio_file: file,
            cover_file: None,
            artist: Some("Me".to_string()),
            album: None,
        };
        let added = gateway(&server).await.upload_song(&upload).await.unwrap();

        assert_eq!(added.len(), 1);
        assert_eq!(added[0].id, "new");

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"songs\""));
        assert!(body.contains("Unknown Album"));
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_io_error() {
        let server = MockServer::start().await;
        let upload = SongUpload {
            audio_file: "/definitely/not/here.mp3".into(),
            cover_file: None,
            artist: None,
            album: None,
        };

        let err = gateway(&server).await.upload_song(&upload).await.unwrap_err();
        assert!(matches!(err, GatewayError::Io(_)));
    }
}

mod auth {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({"email": "j@x.io", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "tok-9",
                "user": {"_id": "u1", "username": "joni", "email": "j@x.io"}
            })))
            .mount(&server)
            .await;

        let session = gateway(&server).await.login("j@x.io", "pw").await.unwrap();

        assert_eq!(session.token, "tok-9");
        assert_eq!(session.user.id, "u1");
    }

    #[tokio::test]
    async fn test_login_failure_uses_default_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = gateway(&server).await.login("j@x.io", "bad").await.unwrap_err();
        assert_eq!(err.reason(), "Login failed");
    }

    #[tokio::test]
    async fn test_register_reports_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "Email already in use"})),
            )
            .mount(&server)
            .await;

        let registration = Registration {
            username: "joni".to_string(),
            email: "j@x.io".to_string(),
            password: "pw".to_string(),
        };
        let err = gateway(&server).await.register(&registration).await.unwrap_err();
        assert_eq!(err.reason(), "Email already in use");
    }

    #[tokio::test]
    async fn test_update_profile_needs_token() {
        let server = MockServer::start().await;

        let err = gateway(&server)
            .await
            .update_profile(&ProfileUpdate::default())
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Unauthorized));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_profile_returns_user() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/user/update"))
            .and(header(AUTH_HEADER, "tok-1"))
            .and(body_json(json!({"username": "joan"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"_id": "u1", "username": "joan"})),
            )
            .mount(&server)
            .await;

        let update = ProfileUpdate {
            username: Some("joan".to_string()),
            ..Default::default()
        };
        let user = signed_in(&server).await.update_profile(&update).await.unwrap();
        assert_eq!(user.username, "joan");
    }
}

mod playlists {
    use super::*;

    #[tokio::test]
    async fn test_my_playlists_requires_token() {
        let server = MockServer::start().await;
        let err = gateway(&server).await.my_playlists().await.unwrap_err();
        assert!(matches!(err, GatewayError::Unauthorized));
    }

    #[tokio::test]
    async fn test_my_playlists_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/playlists/my"))
            .and(header(AUTH_HEADER, "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlists": [{"_id": "p1", "name": "Mix", "songs": ["s1", "s2"]}]
            })))
            .mount(&server)
            .await;

        let playlists = signed_in(&server).await.my_playlists().await.unwrap();

        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].entries.len(), 2);
    }

    #[tokio::test]
    async fn test_create_playlist_is_public_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/playlists"))
            .and(body_json(json!({"name": "Road", "isPublic": true})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"_id": "p9", "name": "Road"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let draft = PlaylistDraft {
            name: Some("Road".to_string()),
            ..Default::default()
        };
        let playlist = signed_in(&server).await.create_playlist(&draft).await.unwrap();

        assert_eq!(playlist.id, "p9");
        assert!(playlist.is_public);
    }
}

mod albums {
    use super::*;

    #[tokio::test]
    async fn test_list_albums() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/albums"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "a1", "title": "Blue", "artist": "Joni", "songs": ["s1"]}
            ])))
            .mount(&server)
            .await;

        let albums = gateway(&server).await.list_albums().await.unwrap();
        assert_eq!(albums[0].title, "Blue");
        assert_eq!(albums[0].entries.len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_without_body_uses_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/albums"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = gateway(&server).await.list_albums().await.unwrap_err();
        assert_eq!(err.reason(), "Internal Server Error");
    }
}
