use crate::error::{Result, SemtagError};
use crate::manifest::{Manifest, ManifestPatch, ManifestStore};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

/// In-memory manifest store for testing without touching the disk
///
/// Holds a single document regardless of the directory asked for, and
/// records which directories were read from and written to.
pub struct MemoryManifestStore {
    document: RefCell<Option<Value>>,
    fail_writes: Cell<bool>,
    reads: RefCell<Vec<PathBuf>>,
    writes: RefCell<Vec<(PathBuf, ManifestPatch)>>,
}

impl MemoryManifestStore {
    /// Create a store holding `{"name": name, "version": version}`
    pub fn new(name: &str, version: &str) -> Self {
        Self::from_value(json!({ "name": name, "version": version }))
    }

    /// Create a store holding an arbitrary document, valid or not
    pub fn from_value(document: Value) -> Self {
        MemoryManifestStore {
            document: RefCell::new(Some(document)),
            fail_writes: Cell::new(false),
            reads: RefCell::new(Vec::new()),
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Create a store with no manifest at all
    pub fn empty() -> Self {
        MemoryManifestStore {
            document: RefCell::new(None),
            fail_writes: Cell::new(false),
            reads: RefCell::new(Vec::new()),
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Make every subsequent write fail with `ManifestWrite`
    pub fn fail_writes(&self) {
        self.fail_writes.set(true);
    }

    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.borrow().clone()
    }

    pub fn writes(&self) -> Vec<(PathBuf, ManifestPatch)> {
        self.writes.borrow().clone()
    }

    /// The currently stored document
    pub fn current(&self) -> Option<Value> {
        self.document.borrow().clone()
    }

    fn load(&self, directory: &Path) -> Result<Manifest> {
        let path = directory.join("package.json");
        match self.document.borrow().clone() {
            Some(value) => Manifest::from_value(value, &path),
            None => Err(SemtagError::ManifestNotFound { path }),
        }
    }
}

impl ManifestStore for MemoryManifestStore {
    fn read(&self, directory: &Path) -> Result<Manifest> {
        self.reads.borrow_mut().push(directory.to_path_buf());
        self.load(directory)
    }

    fn write(&self, directory: &Path, patch: ManifestPatch) -> Result<Manifest> {
        self.writes
            .borrow_mut()
            .push((directory.to_path_buf(), patch.clone()));

        let merged = self.load(directory)?.merged(patch);
        if self.fail_writes.get() {
            return Err(SemtagError::ManifestWrite {
                path: directory.join("package.json"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "simulated write failure"),
            });
        }

        *self.document.borrow_mut() = Some(Value::Object(merged.document().clone()));
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::version_patch;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryManifestStore::new("mock", "1.2.3");
        store.write(Path::new("dir"), version_patch("1.2.4")).unwrap();

        assert_eq!(store.read(Path::new("dir")).unwrap().version(), "1.2.4");
        assert_eq!(store.writes().len(), 1);
        assert_eq!(store.reads(), vec![PathBuf::from("dir")]);
    }

    #[test]
    fn test_memory_store_failing_writes_keep_document() {
        let store = MemoryManifestStore::new("mock", "1.2.3");
        store.fail_writes();
        assert!(store.write(Path::new("dir"), version_patch("9.9.9")).is_err());
        assert_eq!(store.current(), Some(json!({"name": "mock", "version": "1.2.3"})));
    }

    #[test]
    fn test_empty_store() {
        let store = MemoryManifestStore::empty();
        assert!(matches!(
            store.read(Path::new("dir")),
            Err(SemtagError::ManifestNotFound { .. })
        ));
    }
}
