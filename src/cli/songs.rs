use tabled::Table;

use super::Context;
use crate::{
    info,
    management::SongLibrary,
    success,
    types::{SongTableRow, SongUpload, TrackPatch},
    utils, warning,
};

pub async fn list_songs(ctx: &Context, search: Option<String>, playable_only: bool) {
    let mut library = SongLibrary::new();
    let pb = utils::spinner("Loading songs...");
    let result = library.fetch(&ctx.gateway).await.map(|s| s.to_vec());
    pb.finish_and_clear();

    let mut songs = match result {
        Ok(songs) => songs,
        Err(e) => {
            warning!("Failed to load songs. Err: {}", e.reason());
            return;
        }
    };

    if let Some(term) = search {
        utils::filter_tracks(&mut songs, &term);
    }
    if playable_only {
        songs.retain(|s| s.is_playable());
    }
    if songs.is_empty() {
        info!("No songs found.");
        return;
    }

    let likes = ctx.load_likes().await;
    let mut rows: Vec<SongTableRow> = songs
        .iter()
        .map(|s| utils::song_row(s, likes.contains(&s.id)))
        .collect();
    utils::sort_song_table_rows(&mut rows);

    println!("{}", Table::new(rows));
}

pub async fn upload_song(ctx: &Context, upload: SongUpload) {
    if !upload.audio_file.is_file() {
        warning!("File not found: {}", upload.audio_file.display());
        return;
    }

    let mut library = SongLibrary::new();
    let pb = utils::spinner("Uploading song...");
    let result = library.upload(&ctx.gateway, &upload).await;
    pb.finish_and_clear();

    match result {
        Ok(added) if added.is_empty() => info!("Upload accepted, no songs returned."),
        Ok(added) => {
            for song in &added {
                success!("Uploaded {} - {} ({})", song.artist, song.title, song.id);
            }
        }
        Err(e) => warning!("Upload failed. Err: {}", e.reason()),
    }
}

pub async fn update_song(ctx: &Context, id: String, patch: TrackPatch) {
    if patch.is_empty() {
        warning!("Nothing to update. Pass --title, --artist or --album.");
        return;
    }

    let mut library = SongLibrary::new();
    let pb = utils::spinner("Updating song...");
    let result = library.update(&ctx.gateway, &id, &patch).await;
    pb.finish_and_clear();

    match result {
        Ok(song) => success!("Updated {} - {}", song.artist, song.title),
        Err(e) => warning!("Update failed. Err: {}", e.reason()),
    }
}

/// Deletes a song and drops it from the liked songs.
pub async fn delete_song(ctx: &Context, id: String, yes: bool) {
    if !yes && !utils::confirm(&format!("Delete song {}?", id)) {
        info!("Cancelled.");
        return;
    }

    let mut library = SongLibrary::new();
    let pb = utils::spinner("Deleting song...");
    let result = library.delete(&ctx.gateway, &id).await;
    pb.finish_and_clear();

    if let Err(e) = result {
        warning!("Delete failed. Err: {}", e.reason());
        return;
    }

    if let Err(e) = ctx.likes.forget(&id).await {
        warning!("Cannot update liked songs. Err: {}", e);
    }
    success!("Song {} deleted.", id);
}
