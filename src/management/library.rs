//! In-memory caches of the backend's songs, albums and playlists.
//!
//! Each library mirrors one collection of the backend. Mutations go to the
//! gateway first and touch the cache only once the backend accepted them, so
//! a failed call leaves the cached list exactly as it was.

use tracing::debug;

use crate::{
    error::GatewayError,
    gateway::Gateway,
    types::{Album, AlbumDraft, Playlist, PlaylistDraft, SongUpload, Track, TrackPatch},
};

/// Records addressed by a stable id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Track {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Album {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Playlist {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Ordered collection keyed by record id.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    /// Replaces the record stored under `id` wholesale, keeping its position.
    /// Appends when `id` is unknown.
    pub fn replace(&mut self, id: &str, item: T) {
        match self.items.iter_mut().find(|i| i.key() == id) {
            Some(slot) => *slot = item,
            None => self.items.push(item),
        }
    }

    pub fn upsert(&mut self, item: T) {
        let id = item.key().to_string();
        self.replace(&id, item);
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let pos = self.items.iter().position(|i| i.key() == id)?;
        Some(self.items.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|i| i.key() == id)
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SongLibrary {
    songs: Collection<Track>,
}

impl SongLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fetch(&mut self, gateway: &Gateway) -> Result<&[Track], GatewayError> {
        let songs = gateway.list_songs().await?;
        debug!(count = songs.len(), "songs fetched");
        self.songs.replace_all(songs);
        Ok(self.songs.all())
    }

    pub async fn upload(
        &mut self,
        gateway: &Gateway,
        upload: &SongUpload,
    ) -> Result<Vec<Track>, GatewayError> {
        let added = gateway.upload_song(upload).await?;
        self.songs.extend(added.iter().cloned());
        Ok(added)
    }

    pub async fn update(
        &mut self,
        gateway: &Gateway,
        id: &str,
        patch: &TrackPatch,
    ) -> Result<Track, GatewayError> {
        let track = gateway.update_song(id, patch).await?;
        self.songs.replace(id, track.clone());
        Ok(track)
    }

    /// Deletes a song. Returns the cached record that was dropped, if the
    /// song was cached.
    pub async fn delete(
        &mut self,
        gateway: &Gateway,
        id: &str,
    ) -> Result<Option<Track>, GatewayError> {
        gateway.delete_song(id).await?;
        Ok(self.songs.remove(id))
    }

    pub fn get(&self, id: &str) -> Option<&Track> {
        self.songs.get(id)
    }

    pub fn all(&self) -> &[Track] {
        self.songs.all()
    }
}

#[derive(Debug, Default)]
pub struct AlbumLibrary {
    albums: Collection<Album>,
}

impl AlbumLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fetch(&mut self, gateway: &Gateway) -> Result<&[Album], GatewayError> {
        let albums = gateway.list_albums().await?;
        self.albums.replace_all(albums);
        Ok(self.albums.all())
    }

    pub async fn create(
        &mut self,
        gateway: &Gateway,
        draft: &AlbumDraft,
    ) -> Result<Album, GatewayError> {
        let album = gateway.create_album(draft).await?;
        self.albums.push(album.clone());
        Ok(album)
    }

    pub async fn update(
        &mut self,
        gateway: &Gateway,
        id: &str,
        draft: &AlbumDraft,
    ) -> Result<Album, GatewayError> {
        let album = gateway.update_album(id, draft).await?;
        self.albums.replace(id, album.clone());
        Ok(album)
    }

    pub async fn delete(
        &mut self,
        gateway: &Gateway,
        id: &str,
    ) -> Result<Option<Album>, GatewayError> {
        gateway.delete_album(id).await?;
        Ok(self.albums.remove(id))
    }

    pub fn get(&self, id: &str) -> Option<&Album> {
        self.albums.get(id)
    }

    pub fn all(&self) -> &[Album] {
        self.albums.all()
    }
}

#[derive(Debug, Default)]
pub struct PlaylistLibrary {
    playlists: Collection<Playlist>,
}

impl PlaylistLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fetch(&mut self, gateway: &Gateway) -> Result<&[Playlist], GatewayError> {
        let playlists = gateway.my_playlists().await?;
        self.playlists.replace_all(playlists);
        Ok(self.playlists.all())
    }

    pub async fn create(
        &mut self,
        gateway: &Gateway,
        draft: &PlaylistDraft,
    ) -> Result<Playlist, GatewayError> {
        let playlist = gateway.create_playlist(draft).await?;
        self.playlists.push(playlist.clone());
        Ok(playlist)
    }

    pub async fn update(
        &mut self,
        gateway: &Gateway,
        id: &str,
        draft: &PlaylistDraft,
    ) -> Result<Playlist, GatewayError> {
        let playlist = gateway.update_playlist(id, draft).await?;
        self.playlists.replace(id, playlist.clone());
        Ok(playlist)
    }

    pub async fn delete(
        &mut self,
        gateway: &Gateway,
        id: &str,
    ) -> Result<Option<Playlist>, GatewayError> {
        gateway.delete_playlist(id).await?;
        Ok(self.playlists.remove(id))
    }

    pub fn get(&self, id: &str) -> Option<&Playlist> {
        self.playlists.get(id)
    }

    pub fn all(&self) -> &[Playlist] {
        self.playlists.all()
    }
}
