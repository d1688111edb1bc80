//! Cookie-like session token stores.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use quizzify_core::Result;
use quizzify_core::token_store::TokenStore;
use serde::{Deserialize, Serialize};

use crate::storage::AtomicTomlFile;

/// A single persisted cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredCookie {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// On-disk cookie jar, keyed by cookie name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieJar {
    #[serde(default)]
    pub cookies: BTreeMap<String, StoredCookie>,
}

/// Token store backed by a TOML cookie jar file.
///
/// Only the cookie named `cookie_name` is touched; other entries in the jar
/// are preserved.
pub struct FileTokenStore {
    file: AtomicTomlFile<CookieJar>,
    cookie_name: String,
}

impl FileTokenStore {
    pub fn new(path: PathBuf, cookie_name: impl Into<String>) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
            cookie_name: cookie_name.into(),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let Some(jar) = self.file.load()? else {
            return Ok(None);
        };
        match jar.cookies.get(&self.cookie_name) {
            Some(cookie) if cookie.is_expired_at(Utc::now()) => {
                tracing::debug!(cookie = %self.cookie_name, expires_at = %cookie.expires_at, "persisted token expired");
                Ok(None)
            }
            Some(cookie) if cookie.value.is_empty() => Ok(None),
            Some(cookie) => Ok(Some(cookie.value.clone())),
            None => Ok(None),
        }
    }

    fn save(&self, token: &str, expires_at: DateTime<Utc>) -> Result<()> {
        let name = self.cookie_name.clone();
        let cookie = StoredCookie {
            value: token.to_string(),
            expires_at,
        };
        self.file.update(CookieJar::default(), move |jar| {
            jar.cookies.insert(name, cookie);
            Ok(())
        })?;
        tracing::debug!(cookie = %self.cookie_name, path = %self.file.path().display(), "persisted token");
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        if self.file.load()?.is_none() {
            return Ok(());
        }
        let name = self.cookie_name.clone();
        self.file.update(CookieJar::default(), move |jar| {
            jar.cookies.remove(&name);
            Ok(())
        })?;
        tracing::debug!(cookie = %self.cookie_name, "removed persisted token");
        Ok(())
    }
}

/// Token store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    cookie: Mutex<Option<StoredCookie>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds the store, e.g. to simulate a cookie left by an earlier run.
    pub fn with_token(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            cookie: Mutex::new(Some(StoredCookie {
                value: token.into(),
                expires_at,
            })),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let guard = self.cookie.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard
            .as_ref()
            .filter(|cookie| !cookie.is_expired_at(Utc::now()) && !cookie.value.is_empty())
            .map(|cookie| cookie.value.clone()))
    }

    fn save(&self, token: &str, expires_at: DateTime<Utc>) -> Result<()> {
        let mut guard = self.cookie.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(StoredCookie {
            value: token.to_string(),
            expires_at,
        });
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        let mut guard = self.cookie.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
        Ok(())
    }
}
