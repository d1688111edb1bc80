//! Small TOML documents (cookie jar, config) rewritten whole.
//!
//! New content goes to a hidden sibling file, is fsynced, then renamed over
//! the target while `<file>.lock` is held exclusively. The lock file is
//! never deleted, so every writer locks the same inode.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use quizzify_core::{QuizzifyError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> AtomicTomlFile<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _doc: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file is missing or blank.
    pub fn load(&self) -> Result<Option<T>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(toml::from_str(&text)?))
    }

    pub fn save(&self, doc: &T) -> Result<()> {
        let _guard = LockGuard::acquire(&self.path)?;
        self.replace(doc)
    }

    /// Load, edit, write back while holding the lock. `missing` is used when
    /// there is no file yet; if `edit` fails the file is left untouched.
    pub fn update<F>(&self, missing: T, edit: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _guard = LockGuard::acquire(&self.path)?;
        let mut doc = self.load()?.unwrap_or(missing);
        edit(&mut doc)?;
        self.replace(&doc)
    }

    fn replace(&self, doc: &T) -> Result<()> {
        let (dir, name) = split(&self.path)?;
        fs::create_dir_all(dir)?;

        let rendered = toml::to_string_pretty(doc)?;
        let staging = dir.join(format!(".{}.tmp", name));
        {
            let mut out = File::create(&staging)?;
            out.write_all(rendered.as_bytes())?;
            out.sync_all()?;
        }
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

fn split(path: &Path) -> Result<(&Path, String)> {
    match (path.parent(), path.file_name()) {
        (Some(dir), Some(name)) => Ok((dir, name.to_string_lossy().into_owned())),
        _ => Err(QuizzifyError::storage(format!(
            "not a file path: {}",
            path.display()
        ))),
    }
}

/// Holds an `fs2` exclusive lock until dropped.
struct LockGuard {
    file: File,
}

impl LockGuard {
    fn acquire(target: &Path) -> Result<Self> {
        let path = target.with_extension("lock");
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        fs2::FileExt::lock_exclusive(&file).map_err(|e| {
            QuizzifyError::storage(format!("cannot lock {}: {}", path.display(), e))
        })?;
        Ok(Self { file })
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}
