//! # CLI Module
//!
//! User-facing commands of the streaming client. Each command loads what it
//! needs from the [`Context`] built once in `main`, calls the gateway or the
//! player, and reports through the `info!`/`success!`/`warning!`/`error!`
//! status macros.
//!
//! ## Command Categories
//!
//! - **Account**: [`register`], [`login`], [`logout`], [`whoami`], [`profile`]
//! - **Songs**: [`list_songs`], [`upload_song`], [`update_song`], [`delete_song`]
//! - **Albums**: [`list_albums`], [`create_album`], [`update_album`], [`delete_album`]
//! - **Playlists**: [`list_playlists`], [`show_playlist`], [`create_playlist`],
//!   [`update_playlist`], [`delete_playlist`]
//! - **Likes**: [`list_likes`], [`toggle_like`]
//! - **Playback**: [`play`], the interactive player session
//!
//! ## Error Handling
//!
//! A failed gateway call is a transient notice: it is printed with
//! `warning!`, logged, and the command gives up without touching local state.
//! Conditions the user has to fix first (no session, unknown id) end the
//! process through `error!`.

use std::sync::Arc;

use crate::{
    config::Settings,
    error,
    gateway::Gateway,
    management::{LikeStore, SessionStore},
    player::LikeSet,
    warning,
};

mod albums;
mod auth;
mod likes;
mod player;
mod playlists;
mod songs;

pub use albums::{create_album, delete_album, list_albums, update_album};
pub use auth::{login, logout, profile, register, whoami};
pub use likes::{list_likes, toggle_like};
pub use player::{PlayOptions, PlaySelection, play};
pub use playlists::{create_playlist, delete_playlist, list_playlists, show_playlist, update_playlist};
pub use songs::{delete_song, list_songs, update_song, upload_song};

/// Everything a command may need, created once at startup.
pub struct Context {
    pub settings: Settings,
    pub gateway: Gateway,
    pub session: Arc<SessionStore>,
    pub likes: LikeStore,
}

impl Context {
    pub fn new(settings: Settings, session: Arc<SessionStore>) -> Result<Self, crate::error::GatewayError> {
        let gateway = Gateway::new(&settings.api_url, &settings.media_url)?
            .with_token(session.token());
        let likes = LikeStore::new(settings.likes_path.clone());
        Ok(Self {
            settings,
            gateway,
            session,
            likes,
        })
    }

    /// Exits with a hint when the command needs a signed-in user.
    pub(crate) fn require_session(&self) {
        if !self.session.is_signed_in() {
            error!("Not signed in. Please run tunedeck auth login");
        }
    }

    /// Stored likes, or an empty set when the file cannot be read.
    pub(crate) async fn load_likes(&self) -> LikeSet {
        match self.likes.load().await {
            Ok(likes) => likes,
            Err(e) => {
                warning!("Cannot read liked songs. Err: {}", e);
                LikeSet::new()
            }
        }
    }

    pub(crate) async fn save_likes(&self, likes: &LikeSet) {
        if let Err(e) = self.likes.persist(likes).await {
            warning!("Cannot save liked songs. Err: {}", e);
        }
    }
}
