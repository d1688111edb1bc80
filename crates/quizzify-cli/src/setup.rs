//! Wiring: config, token store and the store itself.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use quizzify_application::Store;
use quizzify_core::config::ClientConfig;
use quizzify_core::token_store::TokenStore;
use quizzify_infrastructure::{ConfigService, FileTokenStore, MemoryTokenStore, QuizzifyPaths};

use crate::console::{ConsoleNavigator, ConsoleNotifier};

/// Files live next to an explicit config file, else in the platform dir.
pub fn resolve_paths(config_path: Option<&Path>) -> Result<QuizzifyPaths> {
    match config_path.and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(QuizzifyPaths::with_base(dir)),
        Some(_) => Ok(QuizzifyPaths::with_base(".")),
        None => QuizzifyPaths::platform().context("Failed to resolve config directory"),
    }
}

/// Where the session token lives for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// The cookie jar next to the config file.
    CookieJar,
    /// Process memory only, optionally seeded with a token.
    Ephemeral(Option<String>),
}

impl TokenSource {
    pub fn from_flags(token: Option<String>, no_persist: bool) -> Self {
        match token {
            Some(token) => Self::Ephemeral(Some(token)),
            None if no_persist => Self::Ephemeral(None),
            None => Self::CookieJar,
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, Self::Ephemeral(_))
    }
}

pub fn config_file(config_path: Option<&Path>, paths: &QuizzifyPaths) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths.config_file())
}

/// Config file, then environment, then `--host`.
pub fn load_config(config_path: Option<&Path>, paths: &QuizzifyPaths, host: Option<&str>) -> Result<ClientConfig> {
    let path = config_file(config_path, paths);
    let mut config = ConfigService::new(path.clone())
        .load()
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    if let Some(host) = host {
        config.backend_host = host.to_string();
    }
    Ok(config)
}

fn token_store(source: TokenSource, paths: &QuizzifyPaths, config: &ClientConfig) -> Arc<dyn TokenStore> {
    match source {
        TokenSource::CookieJar => Arc::new(FileTokenStore::new(
            paths.cookie_file(),
            config.cookie_name.clone(),
        )),
        TokenSource::Ephemeral(None) => Arc::new(MemoryTokenStore::new()),
        TokenSource::Ephemeral(Some(token)) => Arc::new(MemoryTokenStore::with_token(
            token,
            Utc::now() + config.token_ttl(),
        )),
    }
}

pub fn build_store(config_path: Option<&Path>, host: Option<&str>, source: TokenSource) -> Result<Store> {
    let paths = resolve_paths(config_path)?;
    let config = load_config(config_path, &paths, host)?;
    tracing::debug!(
        host = %config.backend_host,
        cookies = %paths.cookie_file().display(),
        ephemeral = source.is_ephemeral(),
        "resolved client setup"
    );

    let token_store = token_store(source, &paths, &config);
    let store = Store::connect(
        config,
        token_store,
        Arc::new(ConsoleNavigator),
        Arc::new(ConsoleNotifier),
    )?;
    Ok(store)
}
