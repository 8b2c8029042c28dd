//! Durable local storage, a tiny key-value slot on disk. Failures are never
//! fatal: in-memory state stays authoritative and the worst case is that
//! folders do not survive a restart.

use std::path::PathBuf;

use tracing::{debug, warn};

/// the one key the engine persists
pub(crate) const SERVER_FOLDERS_KEY: &str = "concord:server-folders";

pub(crate) struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    // keys use `:` as a namespace separator; the filesystem gets dots
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key.replace(':', ".")))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(key, error = %err, "no persisted value");
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        if let Err(err) = std::fs::create_dir_all(&self.dir) {
            warn!(key, error = %err, "failed to create storage dir");
            return;
        }
        if let Err(err) = std::fs::write(self.path_for(key), value) {
            warn!(key, error = %err, "failed to persist value");
        }
    }

    #[cfg(test)]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> LocalStorage {
        let dir = std::env::temp_dir().join(format!("concord-test-{}", uuid::Uuid::new_v4()));
        LocalStorage::new(dir)
    }

    #[test]
    fn round_trips_a_value() {
        let storage = scratch();
        assert!(storage.get(SERVER_FOLDERS_KEY).is_none());
        storage.set(SERVER_FOLDERS_KEY, "[1,2,3]");
        assert_eq!(storage.get(SERVER_FOLDERS_KEY).as_deref(), Some("[1,2,3]"));
        let _ = std::fs::remove_dir_all(storage.dir());
    }

    #[test]
    fn write_failure_is_swallowed() {
        // a file where the directory should be makes every write fail
        let dir = std::env::temp_dir().join(format!("concord-test-{}", uuid::Uuid::new_v4()));
        std::fs::write(&dir, b"not a directory").unwrap();
        let storage = LocalStorage::new(dir.clone());
        storage.set(SERVER_FOLDERS_KEY, "[]");
        assert!(storage.get(SERVER_FOLDERS_KEY).is_none());
        let _ = std::fs::remove_file(dir);
    }
}
