//! Key/value storage for persisted cart state.
//!
//! The [`Storage`] trait mirrors browser local storage: string keys, string
//! values, synchronous access, and a per-origin byte quota. Two backends are
//! provided:
//!
//! - [`MemoryStorage`] - in-process map, used by tests and ephemeral sessions
//! - [`FileStorage`] - one file per key under a directory, used by the CLI

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Default quota, matching the usual browser local storage limit.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the value would exceed the storage quota.
    #[error("storage quota exceeded writing {key}: need {needed} bytes, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// The key cannot be used as a storage name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous string key/value store.
pub trait Storage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid, the quota would be exceeded,
    /// or the backend cannot be written. The previous value is kept on error.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Validate a storage key.
///
/// Keys become file names in [`FileStorage`], so they are limited to ASCII
/// alphanumerics, `-`, `_` and `.`, and may not start with a dot.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("cart").is_ok());
        assert!(validate_key("devo-store.cart_v2").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key(&"k".repeat(129)).is_err());
    }

    #[test]
    fn test_quota_error_display() {
        let err = StorageError::QuotaExceeded {
            key: "cart".to_string(),
            needed: 120,
            quota: 100,
        };
        assert_eq!(
            err.to_string(),
            "storage quota exceeded writing cart: need 120 bytes, quota is 100"
        );
    }
}
