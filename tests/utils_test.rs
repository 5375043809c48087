use tunedeck::types::{SongTableRow, Track};
use tunedeck::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, title: &str, artist: &str, album: &str) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        cover_url: None,
        audio_url: None,
        duration: None,
    }
}

// Helper function to create a test song table row
fn create_test_song_row(title: &str, artist: &str) -> SongTableRow {
    SongTableRow {
        id: String::new(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: String::new(),
        length: String::new(),
        liked: String::new(),
    }
}

#[test]
fn test_format_time() {
    assert_eq!(format_time(0.0), "0:00");
    assert_eq!(format_time(5.9), "0:05");
    assert_eq!(format_time(65.0), "1:05");
    assert_eq!(format_time(3600.0), "60:00");
}

#[test]
fn test_format_time_invalid_input() {
    assert_eq!(format_time(f64::NAN), "0:00");
    assert_eq!(format_time(f64::INFINITY), "0:00");
    assert_eq!(format_time(-3.0), "0:00");
}

#[test]
fn test_resolve_media_url() {
    let base = "http://localhost:5000";

    assert_eq!(
        resolve_media_url("uploads/a.mp3", base).as_deref(),
        Some("http://localhost:5000/uploads/a.mp3")
    );
    assert_eq!(
        resolve_media_url("/uploads/a.mp3", "http://localhost:5000/").as_deref(),
        Some("http://localhost:5000/uploads/a.mp3")
    );
    assert_eq!(
        resolve_media_url("https://cdn.test/a.mp3", base).as_deref(),
        Some("https://cdn.test/a.mp3")
    );
    assert_eq!(resolve_media_url("  ", base), None);
}

#[test]
fn test_filter_tracks_case_insensitive() {
    let mut tracks = vec![
        create_test_track("1", "Blue", "Joni Mitchell", "Blue"),
        create_test_track("2", "Harvest", "Neil Young", "Harvest"),
        create_test_track("3", "River", "Joni Mitchell", "Blue"),
    ];

    filter_tracks(&mut tracks, "joni");
    assert_eq!(tracks.len(), 2);

    filter_tracks(&mut tracks, "RIVER");
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].id, "3");
}

#[test]
fn test_sort_song_table_rows() {
    let mut rows = vec![
        create_test_song_row("River", "joni"),
        create_test_song_row("Harvest", "Neil"),
        create_test_song_row("Blue", "Joni"),
    ];

    sort_song_table_rows(&mut rows);

    let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Blue", "River", "Harvest"]);
}

#[test]
fn test_song_row() {
    let mut track = create_test_track("1", "Blue", "Joni", "Blue");
    track.duration = Some(185.0);

    let row = song_row(&track, true);
    assert_eq!(row.length, "3:05");
    assert_eq!(row.liked, "♥");

    track.duration = None;
    let row = song_row(&track, false);
    assert_eq!(row.length, "-");
    assert!(row.liked.is_empty());
}

#[test]
fn test_is_yes() {
    assert!(is_yes("y\n"));
    assert!(is_yes(" YES "));
    assert!(!is_yes(""));
    assert!(!is_yes("nope"));
}

#[test]
fn test_unix_clock() {
    let secs = unix_now();
    let millis = unix_millis();
    assert!(secs > 1_600_000_000);
    assert!(millis / 1000 >= secs as i64);
}
