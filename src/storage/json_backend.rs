use std::{fs, io::ErrorKind, path::PathBuf};

use crate::{
    errors::Result,
    utils::{
        paths::{self, ensure_dir},
        persistence::write_atomic,
    },
};

use super::KeyValueStore;

const FILE_EXTENSION: &str = "json";

/// Stores each key as `<root>/<slug>.json`, replacing files atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    /// Store rooted in the default application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(paths::store_dir_in(&paths::app_data_dir()))
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), FILE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        write_atomic(&path, value)?;
        tracing::debug!(key, path = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "store".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::persistence::tmp_path_for;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(temp.path().join("store")).expect("json store");
        (store, temp)
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (store, _guard) = store_with_temp_dir();
        assert_eq!(store.get("expenses").unwrap(), None);
    }

    #[test]
    fn set_and_get_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        store.set("expenses", "[]").unwrap();
        assert_eq!(store.get("expenses").unwrap().as_deref(), Some("[]"));
        assert!(store.path_for("expenses").ends_with("expenses.json"));
        assert!(!tmp_path_for(&store.path_for("expenses")).exists());
    }

    #[test]
    fn keys_are_slugged() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store
            .path_for("expenses.corrupt")
            .ends_with("expenses_corrupt.json"));
        assert!(store.path_for("../etc").ends_with("___etc.json"));
    }
}
