//! File-backed key-value store: one file per key under a root directory,
//! the local-storage analog for a desktop or server host.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use trolley_core::{CartStorage, StorageError};

pub struct FileCartStorage {
    root: PathBuf,
}

impl FileCartStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        // Keys are namespaced strings like `trolley:cart`; flatten them into
        // a filesystem-safe file name.
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
            .collect();
        self.root.join(name)
    }
}

impl CartStorage for FileCartStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::Read(error.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).map_err(|error| StorageError::Write(error.to_string()))?;

        // Write-then-rename so a crash mid-write never leaves a torn blob.
        // The suffix is appended to the full file name; `with_extension`
        // would swallow dots already present in the sanitized key.
        let path = self.entry_path(key);
        let mut staging = path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        fs::write(&staging, value).map_err(|error| StorageError::Write(error.to_string()))?;
        fs::rename(&staging, &path).map_err(|error| StorageError::Write(error.to_string()))?;

        debug!(event_name = "storage.write", key, bytes = value.len(), "persisted entry");
        Ok(())
    }
}
