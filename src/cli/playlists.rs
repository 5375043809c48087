use tabled::Table;

use super::Context;
use crate::{
    error, info,
    management::{PlaylistLibrary, SongLibrary},
    player::resolve_entries,
    success,
    types::{PlaylistDraft, PlaylistTableRow, SongTableRow},
    utils, warning,
};

pub async fn list_playlists(ctx: &Context) {
    ctx.require_session();

    let mut library = PlaylistLibrary::new();
    let pb = utils::spinner("Loading playlists...");
    let result = library.fetch(&ctx.gateway).await.map(|p| p.to_vec());
    pb.finish_and_clear();

    let playlists = match result {
        Ok(playlists) => playlists,
        Err(e) => {
            warning!("Failed to load playlists. Err: {}", e.reason());
            return;
        }
    };
    if playlists.is_empty() {
        info!("No playlists yet. Create one with tunedeck playlists create");
        return;
    }

    let rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            songs: p.entries.len(),
            public: if p.is_public { "yes" } else { "no" }.to_string(),
            id: p.id,
            name: p.name,
            description: p.description,
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// Lists the songs of one playlist in playlist order.
pub async fn show_playlist(ctx: &Context, id: String) {
    ctx.require_session();

    let mut playlists = PlaylistLibrary::new();
    let mut songs = SongLibrary::new();
    let pb = utils::spinner("Loading playlist...");
    let fetched = playlists.fetch(&ctx.gateway).await.map(|_| ());
    let catalog = songs.fetch(&ctx.gateway).await.map(|s| s.to_vec());
    pb.finish_and_clear();

    if let Err(e) = fetched {
        warning!("Failed to load playlists. Err: {}", e.reason());
        return;
    }
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            warning!("Failed to load songs. Err: {}", e.reason());
            Vec::new()
        }
    };

    let Some(playlist) = playlists.get(&id) else {
        error!("Playlist {} not found", id);
    };

    info!("{} ({} songs)", playlist.name, playlist.entries.len());
    if !playlist.description.is_empty() {
        info!("{}", playlist.description);
    }

    let likes = ctx.load_likes().await;
    let rows: Vec<SongTableRow> = resolve_entries(&playlist.entries, &catalog)
        .iter()
        .map(|s| utils::song_row(s, likes.contains(&s.id)))
        .collect();
    if rows.is_empty() {
        info!("This playlist is empty.");
        return;
    }
    println!("{}", Table::new(rows));
}

pub async fn create_playlist(ctx: &Context, draft: PlaylistDraft) {
    ctx.require_session();

    let mut library = PlaylistLibrary::new();
    let pb = utils::spinner("Creating playlist...");
    let result = library.create(&ctx.gateway, &draft).await;
    pb.finish_and_clear();

    match result {
        Ok(playlist) => success!("Playlist {} created ({}).", playlist.name, playlist.id),
        Err(e) => warning!("Failed to create playlist. Err: {}", e.reason()),
    }
}

pub async fn update_playlist(ctx: &Context, id: String, draft: PlaylistDraft) {
    ctx.require_session();

    let mut library = PlaylistLibrary::new();
    let pb = utils::spinner("Updating playlist...");
    let result = library.update(&ctx.gateway, &id, &draft).await;
    pb.finish_and_clear();

    match result {
        Ok(playlist) => success!("Playlist {} updated.", playlist.name),
        Err(e) => warning!("Failed to update playlist. Err: {}", e.reason()),
    }
}

pub async fn delete_playlist(ctx: &Context, id: String, yes: bool) {
    ctx.require_session();
    if !yes && !utils::confirm(&format!("Delete playlist {}?", id)) {
        info!("Cancelled.");
        return;
    }

    let mut library = PlaylistLibrary::new();
    let pb = utils::spinner("Deleting playlist...");
    let result = library.delete(&ctx.gateway, &id).await;
    pb.finish_and_clear();

    match result {
        Ok(_) => success!("Playlist {} deleted.", id),
        Err(e) => warning!("Failed to delete playlist. Err: {}", e.reason()),
    }
}
