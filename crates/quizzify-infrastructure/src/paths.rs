//! Path management for Quizzify client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/quizzify/          # Config directory (platform specific)
//! ├── config.toml              # Client configuration
//! └── cookies.toml             # Persisted session token
//! ```

use std::path::{Path, PathBuf};

use quizzify_core::QuizzifyError;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot determine config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for QuizzifyError {
    fn from(e: PathError) -> Self {
        QuizzifyError::config(e.to_string())
    }
}

const APP_DIR: &str = "quizzify";
const CONFIG_FILE: &str = "config.toml";
const COOKIE_FILE: &str = "cookies.toml";

/// Resolves the files the client persists.
///
/// By default everything lives under the platform config directory; a custom
/// base directory can be given for tests or portable installs.
#[derive(Debug, Clone)]
pub struct QuizzifyPaths {
    base_dir: PathBuf,
}

impl QuizzifyPaths {
    /// Uses `<platform config dir>/quizzify`.
    pub fn platform() -> Result<Self, PathError> {
        let config_dir = dirs::config_dir().ok_or(PathError::ConfigDirNotFound)?;
        Ok(Self {
            base_dir: config_dir.join(APP_DIR),
        })
    }

    /// Uses `base_dir` directly.
    pub fn with_base(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    pub fn cookie_file(&self) -> PathBuf {
        self.base_dir.join(COOKIE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_base() {
        let paths = QuizzifyPaths::with_base("/tmp/quizzify-test");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/quizzify-test/config.toml"));
        assert_eq!(paths.cookie_file(), PathBuf::from("/tmp/quizzify-test/cookies.toml"));
    }

    #[test]
    fn test_platform_dir_ends_with_app_dir() {
        if let Ok(paths) = QuizzifyPaths::platform() {
            assert!(paths.base_dir().ends_with(APP_DIR));
        }
    }
}
