//! Persistent client state: the guest flag and the session token.
//!
//! [`LocalStore`] is a small string key/value store kept in a JSON file. It
//! plays the role browser local storage plays for the web dashboard, and is
//! written through on every change.

use crate::error::StoreError;
use log::debug;
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Set to `"true"` while the user browses as a guest
pub const GUEST_MODE_KEY: &str = "campusflow_guest_mode";
/// Bearer token of the current session
pub const TOKEN_KEY: &str = "better_auth_token";
/// Cached session payload returned by the session endpoints
pub const SESSION_CACHE_KEY: &str = "better_auth_session";
/// Raw result of the last successful sign-in
pub const SIGN_IN_KEY: &str = "session";

/// Identity of the caller, passed explicitly to every provider call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub is_authenticated: bool,
    /// Sent as a bearer token with backend requests when present
    pub token: Option<String>,
}

impl SessionContext {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn authenticated(token: Option<String>) -> Self {
        Self {
            is_authenticated: true,
            token,
        }
    }

    pub fn is_guest(&self) -> bool {
        !self.is_authenticated
    }

    /// Derives the context from the persisted state. Only an explicit guest
    /// flag puts the caller in guest mode.
    pub fn from_store(store: &LocalStore) -> Self {
        Self {
            is_authenticated: !is_guest_mode(store),
            token: store.get_item(TOKEN_KEY).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl LocalStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let items = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: path.display().to_string(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        self.persist()
    }

    pub fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        if self.items.remove(key).is_some() {
            self.persist()
        } else {
            Ok(())
        }
    }

    fn persist(&self) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_vec_pretty(&self.items).map_err(|source| {
            StoreError::Corrupt {
                path: self.path.display().to_string(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(io_error)?;

        debug!("Saved {} state entries to {}", self.items.len(), self.path.display());
        Ok(())
    }
}

pub fn enable_guest_mode(store: &mut LocalStore) -> Result<(), StoreError> {
    store.set_item(GUEST_MODE_KEY, "true")
}

pub fn disable_guest_mode(store: &mut LocalStore) -> Result<(), StoreError> {
    store.remove_item(GUEST_MODE_KEY)
}

pub fn is_guest_mode(store: &LocalStore) -> bool {
    store.get_item(GUEST_MODE_KEY) == Some("true")
}

/// Forgets every trace of the signed-in session
pub fn clear_session(store: &mut LocalStore) -> Result<(), StoreError> {
    for key in [TOKEN_KEY, SESSION_CACHE_KEY, SIGN_IN_KEY] {
        store.remove_item(key)?;
    }
    Ok(())
}
