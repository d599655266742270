//! File-based key-value storage for Daybook.
//!
//! Each key is stored as `<data_dir>/<key>.json`. Atomic writes are achieved
//! via temp file + rename.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::data_dir;
use crate::error::{DaybookError, Result};
use crate::storage::KeyValueStore;

/// File-based key-value storage.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    /// Directory where value files are stored.
    data_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store in the default data directory.
    ///
    /// Uses `~/.daybook/data/` or `$DAYBOOK_HOME/data/`.
    pub fn new() -> Result<Self> {
        let dir = data_dir().ok_or_else(|| {
            DaybookError::config("Could not determine data directory (no home directory)")
        })?;
        Self::with_dir(dir)
    }

    /// Create a store in a custom directory, creating it if needed.
    pub fn with_dir(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| DaybookError::storage(&data_dir, e))?;
        }

        Ok(Self { data_dir })
    }

    /// The directory this store writes to.
    pub fn dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Reject keys that would escape the data directory or hide as dotfiles.
    fn validate_key(key: &str) -> Result<()> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
        if valid {
            Ok(())
        } else {
            Err(DaybookError::invalid_key(key))
        }
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!(".{}.json.tmp", key))
    }

    /// Write a value atomically using temp file + rename.
    fn atomic_write(&self, key: &str, value: &str) -> Result<()> {
        let final_path = self.value_path(key);
        let temp_path = self.temp_path(key);

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| DaybookError::storage(&temp_path, e))?;
            file.write_all(value.as_bytes())
                .map_err(|e| DaybookError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| DaybookError::storage(&temp_path, e))?;
        }

        // Rename temp file to final path (atomic on POSIX)
        fs::rename(&temp_path, &final_path).map_err(|e| DaybookError::storage(&final_path, e))?;

        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::validate_key(key)?;
        let path = self.value_path(key);

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DaybookError::storage(&path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::validate_key(key)?;
        self.atomic_write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        Self::validate_key(key)?;
        let path = self.value_path(key);

        if path.exists() {
            fs::remove_file(&path).map_err(|e| DaybookError::storage(&path, e))?;
        }

        // Also clean up any temp file left by an interrupted write
        let temp_path = self.temp_path(key);
        if temp_path.exists() {
            let _ = fs::remove_file(&temp_path);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::tests::test_key_value_store_contract;
    use tempfile::TempDir;

    fn create_test_store() -> (FileKeyValueStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::with_dir(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn test_file_store_contract() {
        let (store, _dir) = create_test_store();
        test_key_value_store_contract(&store);
    }

    #[test]
    fn test_with_dir_creates_directory() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("data");
        assert!(!data_path.exists());

        let store = FileKeyValueStore::with_dir(&data_path).unwrap();

        assert!(data_path.is_dir());
        assert_eq!(store.dir(), &data_path);
    }

    #[test]
    fn test_value_path() {
        let (store, _dir) = create_test_store();
        assert!(store
            .value_path("mood-entries")
            .ends_with("mood-entries.json"));
    }

    #[test]
    fn test_set_writes_raw_value() {
        let (store, dir) = create_test_store();
        store.set("journal-entries", "[]").unwrap();

        let content = fs::read_to_string(dir.path().join("journal-entries.json")).unwrap();
        assert_eq!(content, "[]");
    }

    #[test]
    fn test_temp_file_cleaned_up() {
        let (store, _dir) = create_test_store();
        store.set("journal-entries", "[]").unwrap();
        assert!(!store.temp_path("journal-entries").exists());
    }

    #[test]
    fn test_remove_cleans_stale_temp_file() {
        let (store, _dir) = create_test_store();
        fs::write(store.temp_path("mood-entries"), "partial").unwrap();

        store.remove("mood-entries").unwrap();

        assert!(!store.temp_path("mood-entries").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (store, _dir) = create_test_store();

        for key in ["", "../escape", "a/b", ".hidden"] {
            let err = store.set(key, "x").unwrap_err();
            assert!(matches!(err, DaybookError::InvalidKey { .. }), "{key}");
        }
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        FileKeyValueStore::with_dir(dir.path())
            .unwrap()
            .set("mood-entries", "[1]")
            .unwrap();

        let reopened = FileKeyValueStore::with_dir(dir.path()).unwrap();
        assert_eq!(
            reopened.get("mood-entries").unwrap().as_deref(),
            Some("[1]")
        );
    }
}
