use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{error::StoreError, player::LikeSet};

/// Keeps the liked track ids between runs.
///
/// The playback coordinator owns the live [`LikeSet`]; this store only
/// loads it at startup and writes it back after changes.
pub struct LikeStore {
    path: PathBuf,
}

impl LikeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored ids. A missing file is an empty set.
    pub async fn load(&self) -> Result<LikeSet, StoreError> {
        let json = match async_fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LikeSet::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let ids: Vec<String> = serde_json::from_str(&json)?;
        Ok(LikeSet::from_ids(ids))
    }

    pub async fn persist(&self, likes: &LikeSet) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(likes.ids())?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Removes a deleted song from the stored likes. Returns whether it was
    /// liked; the file is only rewritten then.
    pub async fn forget(&self, id: &str) -> Result<bool, StoreError> {
        let mut likes = self.load().await?;
        if !likes.remove(id) {
            return Ok(false);
        }
        self.persist(&likes).await?;
        Ok(true)
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        match async_fs::remove_file(&self.path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(StoreError::Io(e)),
            _ => Ok(()),
        }
    }
}
