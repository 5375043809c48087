//! Normalization boundary between backend JSON and the canonical records.
//!
//! The backend is loose about shapes: ids arrive as `_id` or `id`, media as
//! `audioUrl` or `url`, covers as `coverUrl` or `cover`, and lists either bare,
//! as a single object, or wrapped under a key. Everything is mapped here, once,
//! and nothing downstream re-validates it.

use serde_json::{Map, Value};

use crate::{
    error::GatewayError,
    types::{Album, Playlist, PlaylistEntry, Session, Track, User},
    utils,
};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNTITLED: &str = "Untitled";

/// Values needed to finish a record, chiefly the origin relative media
/// references are resolved against.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeContext<'a> {
    pub media_url: &'a str,
}

impl<'a> NormalizeContext<'a> {
    pub fn new(media_url: &'a str) -> Self {
        Self { media_url }
    }
}

/// Unwraps a list payload.
///
/// Accepts a bare array, an object carrying the list under `key`, or a
/// single object (treated as a one element list).
pub fn records(value: Value, key: &str) -> Result<Vec<Value>, GatewayError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(GatewayError::Malformed(format!(
                "expected `{key}` to be a list, got {}",
                kind(&other)
            ))),
            None => Ok(vec![Value::Object(map)]),
        },
        other => Err(GatewayError::Malformed(format!(
            "expected a list of {key}, got {}",
            kind(&other)
        ))),
    }
}

/// Reads the record id from `_id` or `id`; numeric ids are stringified.
pub fn id_of(value: &Value) -> Option<String> {
    ["_id", "id"].iter().find_map(|k| match value.get(*k) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn text(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        value
            .get(*k)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

fn seconds(value: &Value) -> Option<f64> {
    let secs = match value.get("duration")? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (secs.is_finite() && secs >= 0.0).then_some(secs)
}

fn temp_id(index: usize) -> String {
    format!("temp-{}-{}", utils::unix_millis(), index)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Maps one inbound song record to a [`Track`].
///
/// `index` is the position in the response and only feeds the temporary id
/// given to records the backend sent without one.
pub fn track(value: &Value, index: usize, ctx: &NormalizeContext<'_>) -> Track {
    let cover = text(value, &["coverUrl", "cover"]);
    let audio = text(value, &["audioUrl", "url"]);

    Track {
        id: id_of(value).unwrap_or_else(|| temp_id(index)),
        title: text(value, &["title", "name"]).unwrap_or_else(|| UNTITLED.to_string()),
        artist: text(value, &["artist"]).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        album: text(value, &["album"]).unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
        cover_url: cover.and_then(|c| utils::resolve_media_url(&c, ctx.media_url)),
        audio_url: audio.and_then(|a| utils::resolve_media_url(&a, ctx.media_url)),
        duration: seconds(value),
    }
}

pub fn tracks(value: Value, ctx: &NormalizeContext<'_>) -> Result<Vec<Track>, GatewayError> {
    Ok(records(value, "songs")?
        .iter()
        .enumerate()
        .map(|(i, v)| track(v, i, ctx))
        .collect())
}

/// Reads playlist/album membership from `songs` or `tracks`.
///
/// Strings and numbers are ids; objects are embedded records. Anything else
/// is skipped.
pub fn entries(value: &Value, ctx: &NormalizeContext<'_>) -> Vec<PlaylistEntry> {
    let Some(items) = ["songs", "tracks"]
        .iter()
        .find_map(|k| value.get(*k).and_then(Value::as_array))
    else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            Value::String(id) if !id.is_empty() => Some(PlaylistEntry::Id(id.clone())),
            Value::Number(n) => Some(PlaylistEntry::Id(n.to_string())),
            Value::Object(_) => Some(PlaylistEntry::Track(track(item, i, ctx))),
            _ => None,
        })
        .collect()
}

pub fn playlist(value: &Value, index: usize, ctx: &NormalizeContext<'_>) -> Playlist {
    Playlist {
        id: id_of(value).unwrap_or_else(|| temp_id(index)),
        name: text(value, &["name", "title"]).unwrap_or_else(|| UNTITLED.to_string()),
        description: text(value, &["description"]).unwrap_or_default(),
        is_public: value
            .get("isPublic")
            .and_then(Value::as_bool)
            .unwrap_or(true),
        entries: entries(value, ctx),
    }
}

pub fn playlists(value: Value, ctx: &NormalizeContext<'_>) -> Result<Vec<Playlist>, GatewayError> {
    Ok(records(value, "playlists")?
        .iter()
        .enumerate()
        .map(|(i, v)| playlist(v, i, ctx))
        .collect())
}

pub fn album(value: &Value, index: usize, ctx: &NormalizeContext<'_>) -> Album {
    Album {
        id: id_of(value).unwrap_or_else(|| temp_id(index)),
        title: text(value, &["title", "name"]).unwrap_or_else(|| UNTITLED.to_string()),
        artist: text(value, &["artist"]).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        cover_url: text(value, &["coverUrl", "cover"])
            .and_then(|c| utils::resolve_media_url(&c, ctx.media_url)),
        entries: entries(value, ctx),
    }
}

pub fn albums(value: Value, ctx: &NormalizeContext<'_>) -> Result<Vec<Album>, GatewayError> {
    Ok(records(value, "albums")?
        .iter()
        .enumerate()
        .map(|(i, v)| album(v, i, ctx))
        .collect())
}

pub fn user(value: &Value) -> Result<User, GatewayError> {
    let Value::Object(_) = value else {
        return Err(GatewayError::Malformed(format!(
            "expected a user record, got {}",
            kind(value)
        )));
    };

    Ok(User {
        id: id_of(value).unwrap_or_default(),
        username: text(value, &["username", "name"]).unwrap_or_default(),
        email: text(value, &["email"]).unwrap_or_default(),
    })
}

/// Builds a session from a login response `{ token, user }`.
pub fn session(value: &Value, obtained_at: u64) -> Result<Session, GatewayError> {
    let token = text(value, &["token"])
        .ok_or_else(|| GatewayError::Malformed("login response carries no token".to_string()))?;
    let user = user(value.get("user").unwrap_or(&Value::Object(Map::new())))?;

    Ok(Session {
        token,
        user,
        obtained_at,
    })
}
