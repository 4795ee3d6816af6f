//! File-backed key-value store with atomic-rename writes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{KeyValueStore, StoreError, StoreResult};

/// File-backed [`KeyValueStore`].
///
/// Each key maps to one file inside the root directory. Writes go to a
/// `{key}.tmp` sibling which is synced and then renamed over the target, so
/// a crash mid-write leaves either the old or the new value.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| StoreError::io(format!("create {}", root.display()), e))?;
        log::debug!("opened key-value store at {}", root.display());
        Ok(Self { root })
    }

    /// Returns the root directory of this store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() {
            return Err(StoreError::invalid_key(key, "empty key"));
        }
        // Keys name flat files; anything that could escape the root is rejected.
        if key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(StoreError::invalid_key(key, "path separator in key"));
        }
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(format!("read {}", path.display()), e)),
        }
    }

    fn write_atomic(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)
                .map_err(|e| StoreError::io(format!("create {}", tmp.display()), e))?;
            file.write_all(bytes)
                .map_err(|e| StoreError::io(format!("write {}", tmp.display()), e))?;
            file.sync_all()
                .map_err(|e| StoreError::io(format!("sync {}", tmp.display()), e))?;
        }
        fs::rename(&tmp, &path)
            .map_err(|e| StoreError::io(format!("rename into {}", path.display()), e))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(format!("delete {}", path.display()), e)),
        }
    }
}
