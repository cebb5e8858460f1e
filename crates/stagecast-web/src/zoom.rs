//! Per-address zoom preference persistence.
//!
//! The store is a plain key-value resource: one zoom factor per content
//! address, last write wins. Failures never block show/hide; callers log
//! and continue with the default zoom.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use stagecast_common::StoreError;

/// Key-value persistence keyed by content address.
pub trait ZoomStore: Send {
    fn get_zoom(&self, address: &str) -> Result<Option<f64>, StoreError>;
    fn put_zoom(&self, address: &str, level: f64) -> Result<(), StoreError>;
}

/// In-memory store for tests and hosts that don't persist preferences.
#[derive(Default)]
pub struct MemoryZoomStore {
    records: Mutex<HashMap<String, f64>>,
}

impl MemoryZoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ZoomStore for MemoryZoomStore {
    fn get_zoom(&self, address: &str) -> Result<Option<f64>, StoreError> {
        Ok(self.records.lock().unwrap().get(address).copied())
    }

    fn put_zoom(&self, address: &str, level: f64) -> Result<(), StoreError> {
        self.records.lock().unwrap().insert(address.into(), level);
        Ok(())
    }
}

/// File-backed store: one JSON object mapping address -> zoom level.
///
/// Writes go to a `.tmp` sibling and are renamed into place so a crash
/// mid-write can't corrupt the file.
pub struct JsonZoomStore {
    path: PathBuf,
}

impl JsonZoomStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default path
    /// (`~/.config/stagecast/zoom.json`).
    pub fn at_default_path() -> Result<Self, StoreError> {
        let dir = dirs::config_dir().ok_or(StoreError::NoStorePath)?;
        Ok(Self::new(dir.join("stagecast").join("zoom.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, f64>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, records: &HashMap<String, f64>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json)?;

        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            // Rename can fail across filesystems or on Windows; fall back
            // to a direct write.
            warn!(error = %e, "atomic rename failed, writing directly");
            std::fs::write(&self.path, &json)?;
        }
        Ok(())
    }
}

impl ZoomStore for JsonZoomStore {
    fn get_zoom(&self, address: &str) -> Result<Option<f64>, StoreError> {
        Ok(self.load()?.get(address).copied())
    }

    fn put_zoom(&self, address: &str, level: f64) -> Result<(), StoreError> {
        let mut records = self.load()?;
        records.insert(address.into(), level);
        self.save(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- MemoryZoomStore --

    #[test]
    fn memory_store_miss_is_none() {
        let store = MemoryZoomStore::new();
        assert_eq!(store.get_zoom("pdf:///a.pdf").unwrap(), None);
    }

    #[test]
    fn memory_store_last_write_wins() {
        let store = MemoryZoomStore::new();
        store.put_zoom("pdf:///a.pdf", 1.5).unwrap();
        store.put_zoom("pdf:///a.pdf", 2.0).unwrap();
        assert_eq!(store.get_zoom("pdf:///a.pdf").unwrap(), Some(2.0));
    }

    #[test]
    fn memory_store_keys_are_independent() {
        let store = MemoryZoomStore::new();
        store.put_zoom("pdf:///a.pdf", 1.0).unwrap();
        store.put_zoom("file:///b.html", -0.5).unwrap();
        assert_eq!(store.get_zoom("pdf:///a.pdf").unwrap(), Some(1.0));
        assert_eq!(store.get_zoom("file:///b.html").unwrap(), Some(-0.5));
    }

    // -- JsonZoomStore --

    #[test]
    fn json_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonZoomStore::new(dir.path().join("zoom.json"));

        assert_eq!(store.get_zoom("pdf:///deck.pdf").unwrap(), None);
        store.put_zoom("pdf:///deck.pdf", 2.0).unwrap();
        assert_eq!(store.get_zoom("pdf:///deck.pdf").unwrap(), Some(2.0));
    }

    #[test]
    fn json_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zoom.json");

        JsonZoomStore::new(&path).put_zoom("file:///p.html", 0.5).unwrap();

        let reopened = JsonZoomStore::new(&path);
        assert_eq!(reopened.get_zoom("file:///p.html").unwrap(), Some(0.5));
    }

    #[test]
    fn json_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("zoom.json");

        let store = JsonZoomStore::new(&path);
        store.put_zoom("pdf:///x.pdf", 1.25).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn json_store_updates_preserve_other_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonZoomStore::new(dir.path().join("zoom.json"));

        store.put_zoom("pdf:///a.pdf", 1.0).unwrap();
        store.put_zoom("pdf:///b.pdf", 2.0).unwrap();
        store.put_zoom("pdf:///a.pdf", 3.0).unwrap();

        assert_eq!(store.get_zoom("pdf:///a.pdf").unwrap(), Some(3.0));
        assert_eq!(store.get_zoom("pdf:///b.pdf").unwrap(), Some(2.0));
    }

    #[test]
    fn json_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zoom.json");
        std::fs::write(&path, "not json {").unwrap();

        let store = JsonZoomStore::new(&path);
        assert!(store.get_zoom("pdf:///a.pdf").is_err());
    }
}
