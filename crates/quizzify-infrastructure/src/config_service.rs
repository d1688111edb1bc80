//! Client configuration loading.
//!
//! Priority: environment variables > config.toml > built-in defaults.

use std::path::PathBuf;

use quizzify_core::config::ClientConfig;
use quizzify_core::{QuizzifyError, Result};

use crate::storage::AtomicTomlFile;

pub const ENV_BACKEND_HOST: &str = "QUIZZIFY_BACKEND_HOST";
pub const ENV_SCHEME: &str = "QUIZZIFY_SCHEME";
pub const ENV_APP_ID: &str = "QUIZZIFY_APP_ID";

/// Loads and saves [`ClientConfig`] from a TOML file.
pub struct ConfigService {
    file: AtomicTomlFile<ClientConfig>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Reads the config file (defaults when missing) and applies process
    /// environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = self.load_file()?;
        apply_env_overrides(config, |key| std::env::var(key).ok())
    }

    /// Reads the config file only; no environment overrides.
    pub fn load_file(&self) -> Result<ClientConfig> {
        let config = self.file.load()?.unwrap_or_default();
        tracing::debug!(path = %self.file.path().display(), host = %config.backend_host, "loaded client config");
        Ok(config)
    }

    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        self.file.save(config)?;
        Ok(())
    }
}

/// Applies `QUIZZIFY_*` overrides looked up through `lookup`.
///
/// Blank values are ignored.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(host) = get(ENV_BACKEND_HOST) {
        config.backend_host = host;
    }
    if let Some(scheme) = get(ENV_SCHEME) {
        config.scheme = scheme;
    }
    if let Some(app_id) = get(ENV_APP_ID) {
        config.app_id = app_id.trim().parse().map_err(|e| {
            QuizzifyError::config(format!("{} must be an integer, got '{}': {}", ENV_APP_ID, app_id, e))
        })?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));
        assert_eq!(service.load_file().unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));
        let config = ClientConfig::with_host("quiz.example.com:9000");

        service.save(&config).unwrap();
        assert_eq!(service.load_file().unwrap(), config);
    }

    #[test]
    fn test_env_overrides_win() {
        let config = apply_env_overrides(
            ClientConfig::with_host("from-file:1"),
            lookup(&[(ENV_BACKEND_HOST, "from-env:2"), (ENV_APP_ID, " 5 ")]),
        )
        .unwrap();
        assert_eq!(config.backend_host, "from-env:2");
        assert_eq!(config.app_id, 5);
        assert_eq!(config.scheme, "http");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let config =
            apply_env_overrides(ClientConfig::default(), lookup(&[(ENV_BACKEND_HOST, "  ")])).unwrap();
        assert_eq!(config.backend_host, ClientConfig::default().backend_host);
    }

    #[test]
    fn test_invalid_app_id_is_config_error() {
        let err = apply_env_overrides(ClientConfig::default(), lookup(&[(ENV_APP_ID, "one")]))
            .unwrap_err();
        assert!(matches!(err, QuizzifyError::Config(_)));
    }
}
