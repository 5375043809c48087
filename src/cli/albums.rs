use tabled::Table;

use super::Context;
use crate::{
    info,
    management::AlbumLibrary,
    success,
    types::{AlbumDraft, AlbumTableRow},
    utils, warning,
};

pub async fn list_albums(ctx: &Context, search: Option<String>) {
    let mut library = AlbumLibrary::new();
    let pb = utils::spinner("Loading albums...");
    let result = library.fetch(&ctx.gateway).await.map(|a| a.to_vec());
    pb.finish_and_clear();

    let mut albums = match result {
        Ok(albums) => albums,
        Err(e) => {
            warning!("Failed to load albums. Err: {}", e.reason());
            return;
        }
    };

    if let Some(term) = search {
        let term = term.to_lowercase();
        albums.retain(|a| {
            a.title.to_lowercase().contains(&term) || a.artist.to_lowercase().contains(&term)
        });
    }
    if albums.is_empty() {
        info!("No albums found.");
        return;
    }

    albums.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    let rows: Vec<AlbumTableRow> = albums
        .into_iter()
        .map(|a| AlbumTableRow {
            songs: a.entries.len(),
            id: a.id,
            title: a.title,
            artist: a.artist,
        })
        .collect();

    println!("{}", Table::new(rows));
}

pub async fn create_album(ctx: &Context, draft: AlbumDraft) {
    let mut library = AlbumLibrary::new();
    let pb = utils::spinner("Creating album...");
    let result = library.create(&ctx.gateway, &draft).await;
    pb.finish_and_clear();

    match result {
        Ok(album) => success!("Album {} created ({}).", album.title, album.id),
        Err(e) => warning!("Failed to create album. Err: {}", e.reason()),
    }
}

pub async fn update_album(ctx: &Context, id: String, draft: AlbumDraft) {
    let mut library = AlbumLibrary::new();
    let pb = utils::spinner("Updating album...");
    let result = library.update(&ctx.gateway, &id, &draft).await;
    pb.finish_and_clear();

    match result {
        Ok(album) => success!("Album {} updated.", album.title),
        Err(e) => warning!("Failed to update album. Err: {}", e.reason()),
    }
}

pub async fn delete_album(ctx: &Context, id: String, yes: bool) {
    if !yes && !utils::confirm(&format!("Delete album {}?", id)) {
        info!("Cancelled.");
        return;
    }

    let mut library = AlbumLibrary::new();
    let pb = utils::spinner("Deleting album...");
    let result = library.delete(&ctx.gateway, &id).await;
    pb.finish_and_clear();

    match result {
        Ok(_) => success!("Album {} deleted.", id),
        Err(e) => warning!("Failed to delete album. Err: {}", e.reason()),
    }
}
