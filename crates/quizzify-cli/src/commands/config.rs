//! `quizzify config`: inspect and edit config.toml.

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use quizzify_core::config::ClientConfig;
use quizzify_infrastructure::ConfigService;

/// Fields to change; `None` leaves the stored value alone.
#[derive(Debug, Default)]
pub struct ConfigChanges {
    pub backend_host: Option<String>,
    pub scheme: Option<String>,
    pub app_id: Option<i64>,
}

impl ConfigChanges {
    fn is_empty(&self) -> bool {
        self.backend_host.is_none() && self.scheme.is_none() && self.app_id.is_none()
    }

    fn apply(self, config: &mut ClientConfig) -> Result<()> {
        if let Some(host) = self.backend_host {
            let host = host.trim();
            if host.is_empty() {
                bail!("Backend host must not be empty");
            }
            config.backend_host = host.to_string();
        }
        if let Some(scheme) = self.scheme {
            match scheme.trim() {
                "http" | "https" => config.scheme = scheme.trim().to_string(),
                other => bail!("Unsupported scheme '{}', expected http or https", other),
            }
        }
        if let Some(app_id) = self.app_id {
            config.app_id = app_id;
        }
        Ok(())
    }
}

/// Prints the effective config (file, environment and `--host` merged).
pub fn show(config: &ClientConfig, path: &Path) {
    println!("{} {}", "File:".bold(), path.display());
    println!("{} {}", "Backend host:".bold(), config.backend_host);
    println!("{} {}", "Scheme:".bold(), config.scheme);
    println!("{} {}", "App id:".bold(), config.app_id);
    println!("{} {}", "Cookie:".bold(), config.cookie_name);
    println!("{} {} days", "Token lifetime:".bold(), config.token_ttl_days);
}

/// Writes `changes` into the config file at `path`.
///
/// Only the file is read, so environment overrides never get saved.
pub fn set(path: &Path, changes: ConfigChanges) -> Result<ClientConfig> {
    if changes.is_empty() {
        bail!("Nothing to change. Pass --backend-host, --scheme or --app-id.");
    }

    let service = ConfigService::new(path.to_path_buf());
    let mut config = service
        .load_file()
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    changes.apply(&mut config)?;
    service
        .save(&config)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    println!("{}", format!("Saved {}", path.display()).green());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_writes_only_given_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        set(
            &path,
            ConfigChanges {
                backend_host: Some(" quiz.local:9000 ".to_string()),
                ..ConfigChanges::default()
            },
        )
        .unwrap();
        set(
            &path,
            ConfigChanges {
                scheme: Some("https".to_string()),
                app_id: Some(4),
                ..ConfigChanges::default()
            },
        )
        .unwrap();

        let saved = ConfigService::new(path).load_file().unwrap();
        assert_eq!(saved.backend_host, "quiz.local:9000");
        assert_eq!(saved.scheme, "https");
        assert_eq!(saved.app_id, 4);
        assert_eq!(saved.cookie_name, ClientConfig::default().cookie_name);
    }

    #[test]
    fn test_set_rejects_bad_values_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        assert!(set(&path, ConfigChanges::default()).is_err());
        let bad_scheme = ConfigChanges {
            scheme: Some("ftp".to_string()),
            ..ConfigChanges::default()
        };
        assert!(set(&path, bad_scheme).is_err());
        let blank_host = ConfigChanges {
            backend_host: Some("  ".to_string()),
            ..ConfigChanges::default()
        };
        assert!(set(&path, blank_host).is_err());
        assert!(!path.exists());
    }
}
