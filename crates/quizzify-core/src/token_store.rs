//! Persisted session token storage.
//!
//! The web client keeps its session token in a cookie; this trait is the
//! equivalent cookie-like store for native clients.

use chrono::{DateTime, Utc};

use crate::error::Result;

/// Storage for the single persisted session token.
///
/// Implementations must treat an expired token as absent.
pub trait TokenStore: Send + Sync {
    /// Returns the persisted token, if one exists and has not expired.
    fn load(&self) -> Result<Option<String>>;

    /// Persists `token` until `expires_at`, replacing any previous token.
    fn save(&self, token: &str, expires_at: DateTime<Utc>) -> Result<()>;

    /// Removes the persisted token. Removing a missing token is not an error.
    fn remove(&self) -> Result<()>;
}
