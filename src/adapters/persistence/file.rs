//! File Store - One JSON File per Key
//!
//! Persists each key as `<data_dir>/<key>.json`. Writes are atomic
//! (write to `<key>.json.tmp`, then rename), so a crash leaves either
//! the old or the new value on disk, never a partial write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::error::StorageFault;
use crate::ports::storage::KeyValueStore;

/// Filesystem-backed key-value store.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding one file per key.
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if missing) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageFault> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|source| StorageFault::Unavailable {
            key: dir.display().to_string(),
            source,
        })?;

        info!(path = %dir.display(), "File store opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Map a key onto a file path, rejecting anything that could
    /// escape the store directory.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageFault> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && !key.contains("..")
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if !valid {
            return Err(StorageFault::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn unavailable(key: &str) -> impl FnOnce(std::io::Error) -> StorageFault + '_ {
    move |source| StorageFault::Unavailable {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageFault> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(unavailable(key)(e)),
        }
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<(), StorageFault> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        std::fs::write(&tmp, value).map_err(unavailable(key))?;
        std::fs::rename(&tmp, &path).map_err(unavailable(key))?;

        debug!(path = %path.display(), "Value written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageFault> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(unavailable(key)(e)),
        }
    }
}
