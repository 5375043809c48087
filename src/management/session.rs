use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    error::{SessionError, StoreError},
    gateway::Gateway,
    types::{Session, User},
};

/// The signed-in user and credential, mirrored to a JSON file.
///
/// Built once at startup and shared by reference. Changes made by another
/// process to the file are picked up by [`SessionStore::sync_from_disk`]
/// (or the watcher task) and published to subscribers.
pub struct SessionStore {
    path: PathBuf,
    current: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// An empty store bound to `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            path: path.into(),
            current,
        }
    }

    /// Opens the store and restores the persisted session, if any.
    ///
    /// A corrupt file is removed and treated as signed out.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let store = Self::new(path);
        let session = match read_session(&store.path).await {
            Ok(session) => session,
            Err(StoreError::Serde(e)) => {
                warn!(path = %store.path.display(), error = %e, "discarding corrupt session file");
                let _ = async_fs::remove_file(&store.path).await;
                None
            }
            Err(e) => {
                warn!(path = %store.path.display(), error = %e, "cannot read session file");
                None
            }
        };
        store.current.send_replace(session);
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.current.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Receives every change of the in-memory session.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }

    /// Logs in through the gateway and keeps the resulting session.
    ///
    /// On any gateway failure the previous session stays exactly as it was.
    pub async fn sign_in(
        &self,
        gateway: &Gateway,
        email: &str,
        password: &str,
    ) -> Result<Session, SessionError> {
        let session = gateway.login(email, password).await?;
        write_session(&self.path, &session).await?;
        self.current.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Stores an updated user record (after a profile edit).
    pub async fn replace_user(&self, user: User) -> Result<(), StoreError> {
        let Some(mut session) = self.current() else {
            return Ok(());
        };
        session.user = user;
        write_session(&self.path, &session).await?;
        self.current.send_replace(Some(session));
        Ok(())
    }

    pub async fn sign_out(&self) -> Result<(), StoreError> {
        self.current.send_replace(None);
        match async_fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Re-reads the session file and publishes it if it differs from memory.
    ///
    /// Returns whether anything changed. A file that cannot be parsed (for
    /// instance while another process is still writing it) is ignored until
    /// the next call.
    pub async fn sync_from_disk(&self) -> bool {
        let on_disk = match read_session(&self.path).await {
            Ok(session) => session,
            Err(e) => {
                debug!(error = %e, "session file not readable yet");
                return false;
            }
        };
        let changed = self.current.send_if_modified(|current| {
            if *current == on_disk {
                return false;
            }
            *current = on_disk.clone();
            true
        });
        if changed {
            debug!(signed_in = on_disk.is_some(), "session changed on disk");
        }
        changed
    }

    /// Polls the session file every `period` for external changes.
    pub fn spawn_watcher(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                self.sync_from_disk().await;
            }
        })
    }
}

async fn read_session(path: &Path) -> Result<Option<Session>, StoreError> {
    let content = match async_fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::Io(e)),
    };
    Ok(Some(serde_json::from_str(&content)?))
}

async fn write_session(path: &Path, session: &Session) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(session)?;
    async_fs::write(path, json).await?;
    Ok(())
}
