//! File-backed storage backend.
//!
//! Each key is stored as `<dir>/<key>.json`. Writes go through a sibling
//! `.tmp` file and a rename so a reader never sees a partially written value.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{DEFAULT_QUOTA_BYTES, Storage, StorageError, validate_key};

const VALUE_EXTENSION: &str = "json";

/// Storage rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota: usize,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory with the default quota.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Self::with_quota(dir, DEFAULT_QUOTA_BYTES)
    }

    /// Open a storage directory with an explicit byte quota.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_quota(dir: impl Into<PathBuf>, quota: usize) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), quota, "Opened file storage");
        Ok(Self { dir, quota })
    }

    /// Directory holding the stored values.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{VALUE_EXTENSION}"))
    }

    /// Bytes used by every stored key except `skip`.
    fn used_bytes_excluding(&self, skip: &Path) -> io::Result<usize> {
        let mut used: usize = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path == skip || path.extension().and_then(|e| e.to_str()) != Some(VALUE_EXTENSION) {
                continue;
            }
            let key_len = path
                .file_stem()
                .map_or(0, |stem| stem.to_string_lossy().len());
            let len = usize::try_from(fs::metadata(&path)?.len()).unwrap_or(usize::MAX);
            used = used.saturating_add(key_len).saturating_add(len);
        }
        Ok(used)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let path = self.path_for(key);

        let needed = self.used_bytes_excluding(&path)? + key.len() + value.len();
        if needed > self.quota {
            return Err(StorageError::QuotaExceeded {
                key: key.to_owned(),
                needed,
                quota: self.quota,
            });
        }

        let tmp = path.with_extension(format!("{VALUE_EXTENSION}.tmp"));
        let mut file = fs::File::create(&tmp)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
