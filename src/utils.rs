use std::{cmp::Ordering, io::Write, time::Duration};

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

use crate::types::{SongTableRow, Track};

/// Formats seconds as `m:ss`. Non-finite or negative input shows `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Resolves a media reference against the media origin.
///
/// Absolute `http(s)` references pass through; anything else is joined to
/// `base` with exactly one slash. Empty references resolve to `None`.
pub fn resolve_media_url(reference: &str, base: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    if reference.starts_with("http") {
        return Some(reference.to_string());
    }
    Some(format!(
        "{}/{}",
        base.trim_end_matches('/'),
        reference.trim_start_matches('/')
    ))
}

pub fn unix_now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

pub fn unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Keeps tracks whose title, artist or album contains `term`, case-insensitive.
pub fn filter_tracks(tracks: &mut Vec<Track>, term: &str) {
    let term = term.to_lowercase();
    tracks.retain(|t| {
        t.title.to_lowercase().contains(&term)
            || t.artist.to_lowercase().contains(&term)
            || t.album.to_lowercase().contains(&term)
    });
}

pub fn sort_song_table_rows(rows: &mut [SongTableRow]) {
    rows.sort_by(|a, b| match a.artist.to_lowercase().cmp(&b.artist.to_lowercase()) {
        Ordering::Equal => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        other => other,
    });
}

pub fn song_row(track: &Track, liked: bool) -> SongTableRow {
    SongTableRow {
        id: track.id.clone(),
        title: track.title.clone(),
        artist: track.artist.clone(),
        album: track.album.clone(),
        length: track.duration.map(format_time).unwrap_or_else(|| "-".to_string()),
        liked: if liked { "♥".to_string() } else { String::new() },
    }
}

/// Spinner shown while a gateway request is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

/// Asks a yes/no question on stdin. Anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> bool {
    print!("{} [y/N] ", question);
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Reads one line from stdin after printing `label`. Empty input is `None`.
pub fn prompt(label: &str) -> Option<String> {
    print!("{}: ", label);
    std::io::stdout().flush().ok()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer).ok()?;
    let answer = answer.trim();
    (!answer.is_empty()).then(|| answer.to_string())
}
