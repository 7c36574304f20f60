//! Key-value persistence for the plan document.
//!
//! The document lives under a single key, so the store interface is just
//! "read the blob, write the blob". `JsonFileStore` keeps it in one JSON
//! file on disk; `MemoryStore` backs tests and embedding.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::{PlanError, PlanResult};

pub trait PlanStore {
    /// Read the raw stored document, or `None` if nothing was ever written.
    fn read(&self) -> PlanResult<Option<String>>;

    /// Persist the raw document. All-or-nothing at this granularity.
    fn write(&self, content: &str) -> PlanResult<()>;
}

/// Stores the document as a single JSON file on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, content: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Temp file + rename keeps the previous document intact if the
        // write fails partway.
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl PlanStore for JsonFileStore {
    fn read(&self) -> PlanResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) => Err(PlanError::Store(format!(
                "Could not read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn write(&self, content: &str) -> PlanResult<()> {
        self.write_file(content).map_err(|e| {
            PlanError::Store(format!("Could not write {}: {e}", self.path.display()))
        })
    }
}

/// In-process store with no persistence.
#[derive(Default)]
pub struct MemoryStore {
    content: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl PlanStore for MemoryStore {
    fn read(&self) -> PlanResult<Option<String>> {
        Ok(self.content.borrow().clone())
    }

    fn write(&self, content: &str) -> PlanResult<()> {
        *self.content.borrow_mut() = Some(content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("plans.json"));

        assert_eq!(store.read().unwrap(), None);
        store.write("{\"plans\":{}}").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("{\"plans\":{}}"));
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deep/plans.json"));

        store.write("{}").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("plans.json"));

        store.write("first").unwrap();
        store.write("second").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_file_store_surfaces_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        // Parent path is occupied by a plain file, so the write cannot land.
        let store = JsonFileStore::new(blocker.join("plans.json"));
        assert!(matches!(store.write("{}"), Err(PlanError::Store(_))));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.read().unwrap(), None);
        store.write("content").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("content"));
    }
}
