//! Configuration management for the streaming client.
//!
//! Values come from environment variables and an optional `.env` file in the
//! platform specific local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file under `<data_local_dir>/tunedeck/.env`
//! 3. Application defaults
//!
//! [`Settings::from_env`] reads everything once at startup; the result is
//! passed to the components that need it instead of being looked up globally.

use std::{env, path::PathBuf, time::Duration};

pub const APP_DIR: &str = "tunedeck";

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_MEDIA_URL: &str = "http://localhost:5000";
const DEFAULT_SESSION_POLL_MS: u64 = 1000;
const DEFAULT_FALLBACK_TRACK_SECS: f64 = 180.0;
const DEFAULT_TICK_MS: u64 = 250;

/// Loads environment variables from the `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist. A missing `.env` file
/// is fine: every key has a default.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Root of everything the client keeps on disk.
///
/// - Linux: `~/.local/share/tunedeck`
/// - macOS: `~/Library/Application Support/tunedeck`
/// - Windows: `%LOCALAPPDATA%/tunedeck`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Base URL of the REST API, e.g. `http://localhost:5000/api`.
pub fn api_url() -> String {
    env::var("TUNEDECK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Origin that relative media references are resolved against.
pub fn media_url() -> String {
    env::var("TUNEDECK_MEDIA_URL").unwrap_or_else(|_| DEFAULT_MEDIA_URL.to_string())
}

/// How often the session file is checked for changes made by another process.
pub fn session_poll_interval() -> Duration {
    Duration::from_millis(parse_var("TUNEDECK_SESSION_POLL_MS").unwrap_or(DEFAULT_SESSION_POLL_MS))
}

/// Length assumed for tracks whose duration the backend does not report.
pub fn fallback_track_secs() -> f64 {
    parse_var::<f64>("TUNEDECK_FALLBACK_TRACK_SECS")
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .unwrap_or(DEFAULT_FALLBACK_TRACK_SECS)
}

/// Clock resolution of the interactive player.
pub fn tick_interval() -> Duration {
    Duration::from_millis(parse_var("TUNEDECK_TICK_MS").unwrap_or(DEFAULT_TICK_MS).max(10))
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Snapshot of all runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub media_url: String,
    pub session_path: PathBuf,
    pub likes_path: PathBuf,
    pub log_dir: PathBuf,
    pub session_poll: Duration,
    pub fallback_track_secs: f64,
    pub tick: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        let root = data_dir();
        Self {
            api_url: api_url(),
            media_url: media_url(),
            session_path: root.join("session.json"),
            likes_path: root.join("state").join("likes.json"),
            log_dir: root.join("logs"),
            session_poll: session_poll_interval(),
            fallback_track_secs: fallback_track_secs(),
            tick: tick_interval(),
        }
    }
}
