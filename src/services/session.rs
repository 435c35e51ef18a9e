//! Bearer token storage shared by the API client

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::error::{AppError, AppResult};

/// Holds the access token in memory, mirrored to a file when one is configured.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

#[derive(Debug, Default)]
struct SessionInner {
    file: Option<PathBuf>,
    token: RwLock<Option<String>>,
}

impl SessionStore {
    /// Session that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Session persisted at `file`, loading any token already stored there
    pub fn open(file: impl Into<PathBuf>) -> AppResult<Self> {
        let file = file.into();
        let token = match fs::read_to_string(&file) {
            Ok(raw) => Some(raw.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            inner: Arc::new(SessionInner {
                file: Some(file),
                token: RwLock::new(token),
            }),
        })
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn store(&self, token: &str) -> AppResult<()> {
        if let Some(file) = &self.inner.file {
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(file, token)?;
        }
        *self.write_guard()? = Some(token.to_string());
        Ok(())
    }

    /// Forget the token, in memory and on disk
    pub fn clear(&self) -> AppResult<()> {
        *self.write_guard()? = None;
        if let Some(file) = &self.inner.file {
            match fs::remove_file(file) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn write_guard(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, Option<String>>> {
        self.inner
            .token
            .write()
            .map_err(|_| AppError::Io(std::io::Error::other("session lock poisoned")))
    }
}
