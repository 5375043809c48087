use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Canonical track record. Every inbound shape is folded into this one by
/// `gateway::normalize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub cover_url: Option<String>,
    pub audio_url: Option<String>,
    /// Length in seconds, when the backend knows it.
    pub duration: Option<f64>,
}

impl Track {
    pub fn is_playable(&self) -> bool {
        self.audio_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// A playlist or album member: either a bare id or an embedded record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaylistEntry {
    Id(String),
    Track(Track),
}

impl PlaylistEntry {
    pub fn id(&self) -> &str {
        match self {
            PlaylistEntry::Id(id) => id,
            PlaylistEntry::Track(track) => &track.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub cover_url: Option<String>,
    pub entries: Vec<PlaylistEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_public: bool,
    pub entries: Vec<PlaylistEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Signed-in user plus the credential the backend handed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// Partial track edit. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

impl TrackPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.album.is_none()
    }
}

/// Local files and labels for a song upload.
#[derive(Debug, Clone)]
pub struct SongUpload {
    pub audio_file: PathBuf,
    pub cover_file: Option<PathBuf>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub songs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub songs: Option<Vec<String>>,
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub length: String,
    pub liked: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub songs: usize,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub public: String,
    pub songs: usize,
}
