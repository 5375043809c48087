mod library;
mod likes;
mod session;

pub use library::AlbumLibrary;
pub use library::Collection;
pub use library::Keyed;
pub use library::PlaylistLibrary;
pub use library::SongLibrary;
pub use likes::LikeStore;
pub use session::SessionStore;
