use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{Storage, StorageError};

/// Slots kept in a single JSON object file.
///
/// A missing or unreadable file opens as empty; every write rewrites the
/// whole file.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStorage {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Ignoring corrupt storage file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => {
                log::info!("No storage file at {}, starting fresh", path.display());
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("ant_smasher_{}_{}.json", name, std::process::id()));
        let _ = std::fs::remove_file(&p);
        p
    }

    #[test]
    fn test_reopen_sees_writes() {
        let path = temp_path("reopen");
        let mut storage = JsonFileStorage::open(&path);
        assert_eq!(storage.get("best"), None);
        storage.set("best", "7").unwrap();

        let reopened = JsonFileStorage::open(&path);
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(reopened.get("best").as_deref(), Some("7"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{ nope").unwrap();
        let storage = JsonFileStorage::open(&path);
        assert_eq!(storage.get("best"), None);
        let _ = std::fs::remove_file(&path);
    }
}
