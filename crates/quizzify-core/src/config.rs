//! Client configuration model.

use serde::{Deserialize, Serialize};

/// Backend host used when nothing else is configured.
pub const DEFAULT_BACKEND_HOST: &str = "localhost:8080";
/// Application identifier sent with every login request.
pub const DEFAULT_APP_ID: i64 = 1;
/// Name of the cookie that carries the session token.
pub const DEFAULT_COOKIE_NAME: &str = "quizzify-token";
/// Lifetime of the persisted session token.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 90;

/// Configuration for talking to a Quizzify backend.
///
/// Loaded from `config.toml`; every field has a default so a partial or
/// missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host (and optional port) of the backend gateway, e.g. `quiz.example.com:8080`.
    pub backend_host: String,
    /// URL scheme used when `backend_host` carries none.
    pub scheme: String,
    /// Application identifier sent with login credentials.
    pub app_id: i64,
    /// Name of the persisted token cookie.
    pub cookie_name: String,
    /// Days until the persisted token expires.
    pub token_ttl_days: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_host: DEFAULT_BACKEND_HOST.to_string(),
            scheme: "http".to_string(),
            app_id: DEFAULT_APP_ID,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at `backend_host` with default everything else.
    pub fn with_host(backend_host: impl Into<String>) -> Self {
        Self {
            backend_host: backend_host.into(),
            ..Self::default()
        }
    }

    /// Returns the token lifetime as a chrono duration.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.token_ttl_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.backend_host, "localhost:8080");
        assert_eq!(config.scheme, "http");
        assert_eq!(config.app_id, 1);
        assert_eq!(config.cookie_name, "quizzify-token");
        // 7776e6 ms
        assert_eq!(config.token_ttl().num_milliseconds(), 7_776_000_000);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str("backend_host = \"quiz.local:9000\"").unwrap();
        assert_eq!(config.backend_host, "quiz.local:9000");
        assert_eq!(config.cookie_name, DEFAULT_COOKIE_NAME);
        assert_eq!(config.token_ttl_days, DEFAULT_TOKEN_TTL_DAYS);
    }
}
