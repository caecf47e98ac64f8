//! `cap_std` directory-backed session store.
//!
//! Each key is one `<key>.json` file inside a single capability-scoped
//! directory. Writes go to a staging file first and are renamed into place,
//! so readers never observe a half-written value.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use uuid::Uuid;

use crate::domain::ports::{SessionStore, SessionStoreError};

/// Session store persisting values as files in one directory.
#[derive(Debug, Clone)]
pub struct DirSessionStore {
    dir: Arc<Dir>,
}

impl DirSessionStore {
    /// Open (creating if needed) the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(path: &Path) -> Result<Self, SessionStoreError> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(|err| io_error(path.display(), &err))?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| io_error(path.display(), &err))?;
        Ok(Self::from_dir(dir))
    }

    /// Wrap an already opened directory.
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }

    async fn blocking<T, F>(&self, key: &str, op: F) -> Result<T, SessionStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir, &str) -> Result<T, SessionStoreError> + Send + 'static,
    {
        let file_name = file_name(key)?;
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || op(dir.as_ref(), file_name.as_str()))
            .await
            .map_err(|err| SessionStoreError::io(format!("storage task failed: {err}")))?
    }
}

fn io_error(target: impl std::fmt::Display, err: &io::Error) -> SessionStoreError {
    SessionStoreError::io(format!("{target}: {err}"))
}

fn file_name(key: &str) -> Result<String, SessionStoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(format!("{key}.json"))
    } else {
        Err(SessionStoreError::io(format!("invalid storage key {key:?}")))
    }
}

#[async_trait]
impl SessionStore for DirSessionStore {
    async fn load(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        self.blocking(key, |dir, name| match dir.read(name) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|err| SessionStoreError::corrupt(format!("{name}: {err}"))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(name, &err)),
        })
        .await
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let value = value.to_owned();
        self.blocking(key, move |dir, name| {
            let staging = format!(".{name}.{}.tmp", Uuid::new_v4().simple());
            dir.write(&staging, value.as_bytes())
                .map_err(|err| io_error(&staging, &err))?;
            dir.rename(&staging, dir, name).map_err(|err| {
                let _cleanup = dir.remove_file(&staging);
                io_error(name, &err)
            })
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        self.blocking(key, |dir, name| match dir.remove_file(name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(name, &err)),
        })
        .await
    }
}
