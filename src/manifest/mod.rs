//! Version manifest access
//!
//! The manifest is a JSON object holding at least a `name` and a `version`
//! string. Every read goes back to the file; every write is a
//! read-merge-write of the whole document.
//!
//! - [store::FsManifestStore]: the real store over a [FileSystem]
//! - [memory::MemoryManifestStore]: in-memory store for tests

pub mod memory;
pub mod store;

pub use memory::MemoryManifestStore;
pub use store::{FileSystem, FsManifestStore, StdFileSystem};

use crate::error::{Result, SemtagError};
use serde_json::{Map, Value};
use std::path::Path;

/// Default manifest file name inside the project directory
pub const DEFAULT_MANIFEST_FILE: &str = "package.json";

/// A shallow set of keys to merge over an existing manifest
pub type ManifestPatch = Map<String, Value>;

/// A validated manifest document
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    document: Map<String, Value>,
}

impl Manifest {
    /// Validate a parsed JSON value as a manifest.
    ///
    /// `origin` only names the source in error messages.
    pub fn from_value(value: Value, origin: &Path) -> Result<Self> {
        let document = match value {
            Value::Object(document) => document,
            _ => {
                return Err(SemtagError::invalid_manifest(
                    origin,
                    "document is not a JSON object",
                ))
            }
        };

        for field in ["name", "version"] {
            match document.get(field) {
                Some(Value::String(s)) if !s.is_empty() => {}
                Some(_) => {
                    return Err(SemtagError::invalid_manifest(
                        origin,
                        format!("field '{}' must be a non-empty string", field),
                    ))
                }
                None => {
                    return Err(SemtagError::invalid_manifest(
                        origin,
                        format!("missing required field '{}'", field),
                    ))
                }
            }
        }

        Ok(Manifest { document })
    }

    pub fn name(&self) -> &str {
        self.document
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The raw version string, which may not be strict semver
    pub fn version(&self) -> &str {
        self.document
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Shallow merge: patch keys overwrite, everything else is kept
    pub fn merged(mut self, patch: ManifestPatch) -> Self {
        for (key, value) in patch {
            self.document.insert(key, value);
        }
        self
    }

    /// Pretty JSON with 2-space indentation and no trailing newline
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.document)
    }
}

/// Build a patch that only sets `version`
pub fn version_patch(version: impl Into<String>) -> ManifestPatch {
    let mut patch = ManifestPatch::new();
    patch.insert("version".to_string(), Value::String(version.into()));
    patch
}

/// Read and merge-write access to the manifest of a project directory
pub trait ManifestStore {
    /// Load the manifest found in `directory`
    ///
    /// # Errors
    /// `ManifestNotFound`, `ManifestRead`, `ManifestParse` or `ManifestInvalid`.
    fn read(&self, directory: &Path) -> Result<Manifest>;

    /// Merge `patch` over the current manifest and persist the whole document.
    ///
    /// Returns the merged document as written, without reading it back.
    ///
    /// # Errors
    /// Any error of [ManifestStore::read], plus `ManifestWrite`.
    fn write(&self, directory: &Path, patch: ManifestPatch) -> Result<Manifest>;
}

impl<T: ManifestStore + ?Sized> ManifestStore for &T {
    fn read(&self, directory: &Path) -> Result<Manifest> {
        (**self).read(directory)
    }

    fn write(&self, directory: &Path, patch: ManifestPatch) -> Result<Manifest> {
        (**self).write(directory, patch)
    }
}
