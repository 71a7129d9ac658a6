use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub trait Persistable: Sized + Default + Serialize + for<'de> Deserialize<'de> {
    fn filename() -> &'static str;
    fn is_json() -> bool;

    /// Missing files load as `Default`.
    fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::filename());
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if Self::is_json() {
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse JSON from {}", path.display()))
        } else {
            serde_norway::from_str(&contents)
                .with_context(|| format!("failed to parse YAML from {}", path.display()))
        }
    }

    fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let path = dir.join(Self::filename());
        let contents = if Self::is_json() {
            serde_json::to_string_pretty(self).context("failed to serialize JSON")?
        } else {
            serde_norway::to_string(self).context("failed to serialize YAML")?
        };
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!("saved {}", path.display());
        Ok(())
    }
}

/// Handle on the data directory. Built once in `main` and passed to every
/// command that reads or writes files.
#[derive(Clone, Debug)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Store { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load<T: Persistable>(&self) -> Result<T> {
        T::load_from(&self.dir)
    }

    pub fn save<T: Persistable>(&self, value: &T) -> Result<()> {
        value.save_to(&self.dir)
    }

    /// True when the directory does not exist or holds no entries.
    pub fn needs_init(&self) -> bool {
        if !self.dir.exists() {
            return true;
        }
        self.dir
            .read_dir()
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false)
    }
}
