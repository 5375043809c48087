use tabled::Table;

use super::Context;
use crate::{
    info,
    management::SongLibrary,
    success,
    types::SongTableRow,
    utils, warning,
};

/// Shows the liked songs in the order they were liked.
pub async fn list_likes(ctx: &Context) {
    let likes = ctx.load_likes().await;
    if likes.is_empty() {
        info!("No liked songs yet.");
        return;
    }

    let mut library = SongLibrary::new();
    let pb = utils::spinner("Loading songs...");
    let result = library.fetch(&ctx.gateway).await.map(|_| ());
    pb.finish_and_clear();

    if let Err(e) = result {
        warning!("Failed to load songs. Err: {}", e.reason());
        return;
    }

    let rows: Vec<SongTableRow> = likes
        .ids()
        .iter()
        .filter_map(|id| library.get(id))
        .map(|s| utils::song_row(s, true))
        .collect();
    let missing = likes.len() - rows.len();

    if !rows.is_empty() {
        println!("{}", Table::new(rows));
    }
    if missing > 0 {
        info!("{} liked songs are no longer available.", missing);
    }
}

/// Flips the like flag of a song. Likes are local; the song id is not
/// checked against the backend.
pub async fn toggle_like(ctx: &Context, song_id: String) {
    let mut likes = ctx.load_likes().await;
    let liked = likes.toggle(&song_id);
    ctx.save_likes(&likes).await;

    if liked {
        success!("Liked {}", song_id);
    } else {
        success!("Removed {} from liked songs", song_id);
    }
}
