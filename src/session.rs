// Session markers: the token and the serialized user info that together
// mean "signed in". They live as two small files in the session
// directory, one per key, and are handed to the router guard as a plain
// value instead of being read from disk inside it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ClientError, Result};

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

pub const TOKEN_KEY: &str = "token";
pub const USER_INFO_KEY: &str = "userInfo";

/// Locally persisted evidence of a signed-in user. Nothing here is
/// validated; the server decides whether the token is still good.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMarkers {
    pub token: Option<String>,
    pub user_info: Option<String>,
}

impl SessionMarkers {
    pub fn new(token: Option<String>, user_info: Option<String>) -> Self {
        SessionMarkers { token, user_info }
    }

    /// Empty strings count as missing.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn has_user_info(&self) -> bool {
        self.user_info.as_deref().is_some_and(|u| !u.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.has_token() && self.has_user_info()
    }
}

/// File-backed key/value store for the two session markers.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SessionStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read both markers. Missing files are absent markers, not errors.
    ///
    /// # Errors
    ///
    /// `ClientError::Io` when a marker file exists but cannot be read.
    pub fn load(&self) -> Result<SessionMarkers> {
        Ok(SessionMarkers {
            token: self.read_entry(TOKEN_KEY)?,
            user_info: self.read_entry(USER_INFO_KEY)?,
        })
    }

    /// Write present markers and remove absent ones.
    ///
    /// # Errors
    ///
    /// `ClientError::Io` when the directory or a file cannot be written.
    pub fn save(&self, markers: &SessionMarkers) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| ClientError::Io {
            path: self.dir.clone(),
            source,
        })?;
        self.write_entry(TOKEN_KEY, markers.token.as_deref())?;
        self.write_entry(USER_INFO_KEY, markers.user_info.as_deref())?;
        debug!(dir = %self.dir.display(), "session saved");
        Ok(())
    }

    /// Remove both markers (logout).
    ///
    /// # Errors
    ///
    /// `ClientError::Io` when an existing file cannot be removed.
    pub fn clear(&self) -> Result<()> {
        self.write_entry(TOKEN_KEY, None)?;
        self.write_entry(USER_INFO_KEY, None)?;
        debug!(dir = %self.dir.display(), "session cleared");
        Ok(())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn read_entry(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(data) => {
                let data = data.trim();
                Ok((!data.is_empty()).then(|| data.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ClientError::Io { path, source }),
        }
    }

    fn write_entry(&self, key: &str, value: Option<&str>) -> Result<()> {
        let path = self.entry_path(key);
        let outcome = match value {
            Some(v) => fs::write(&path, v),
            None => match fs::remove_file(&path) {
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        outcome.map_err(|source| ClientError::Io { path, source })
    }
}
