//! Best-effort durable key/value storage.
//!
//! Each key lives in its own file under the store's directory. Reads of missing or
//! malformed data return a default; write failures are logged and dropped.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

pub const FAVORITES_KEY: &str = "favorite_movies";
pub const LAST_QUERY_KEY: &str = "last_search_query";
pub const THEME_KEY: &str = "theme_mode";

const APP_DIR: &str = "movie_explorer";

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    root: Option<PathBuf>,
}

impl PreferenceStore {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        if let Err(e) = fs::create_dir_all(&root) {
            tracing::warn!(path = %root.display(), "Could not create preference directory: {}", e);
        }
        Self { root: Some(root) }
    }

    /// `<data dir>/movie_explorer`, or a disabled store when the platform has no data dir.
    pub fn default_location() -> Self {
        match default_dir() {
            Some(dir) => Self::open(dir),
            None => {
                tracing::warn!("No data directory available, preferences will not persist");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { root: None }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        self.root.as_ref().map(|root| root.join(key))
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, "Could not read preference: {}", e);
                None
            }
        }
    }

    pub fn set_string(&self, key: &str, value: &str) {
        let Some(path) = self.path_for(key) else {
            tracing::warn!(key, "Preference store disabled, dropping write");
            return;
        };
        if let Err(e) = fs::write(&path, value) {
            tracing::warn!(key, "Could not save preference: {}", e);
        }
    }

    pub fn remove_key(&self, key: &str) {
        let Some(path) = self.path_for(key) else {
            return;
        };
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(key, "Could not remove preference: {}", e),
        }
    }

    pub fn get_json<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(raw) = self.get_string(key) else {
            return T::default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, "Stored preference is malformed, using default: {}", e);
                T::default()
            }
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.set_string(key, &raw),
            Err(e) => tracing::warn!(key, "Could not serialize preference: {}", e),
        }
    }
}

fn default_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn strings_round_trip_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path());

        assert_eq!(store.get_string(LAST_QUERY_KEY), None);
        store.set_string(LAST_QUERY_KEY, "batman");
        assert_eq!(store.get_string(LAST_QUERY_KEY).as_deref(), Some("batman"));

        store.remove_key(LAST_QUERY_KEY);
        assert_eq!(store.get_string(LAST_QUERY_KEY), None);
        // Removing twice is fine.
        store.remove_key(LAST_QUERY_KEY);
    }

    #[test]
    fn malformed_json_reads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path());
        store.set_string(FAVORITES_KEY, "{not json");

        let favorites: Vec<u64> = store.get_json(FAVORITES_KEY);
        assert!(favorites.is_empty());
    }

    #[test]
    fn json_values_persist_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let mut value = BTreeMap::new();
        value.insert("a".to_string(), 1);
        PreferenceStore::open(dir.path()).set_json("map", &value);

        let reopened: BTreeMap<String, i32> = PreferenceStore::open(dir.path()).get_json("map");
        assert_eq!(reopened, value);
    }

    #[test]
    fn disabled_store_swallows_everything() {
        let store = PreferenceStore::disabled();
        store.set_string(THEME_KEY, "dark");
        store.remove_key(THEME_KEY);
        assert_eq!(store.get_string(THEME_KEY), None);
        let list: Vec<String> = store.get_json(FAVORITES_KEY);
        assert!(list.is_empty());
    }

    #[test]
    fn write_into_missing_directory_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore {
            root: Some(dir.path().join("gone").join("deeper")),
        };
        store.set_string(THEME_KEY, "dark");
        assert_eq!(store.get_string(THEME_KEY), None);
    }
}
