use crate::error::{Result, SemtagError};
use crate::manifest::{Manifest, ManifestPatch, ManifestStore, DEFAULT_MANIFEST_FILE};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The few filesystem calls the manifest store needs
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// [FileSystem] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

/// Manifest store reading `<directory>/<file_name>` from disk
#[derive(Debug, Clone)]
pub struct FsManifestStore<F = StdFileSystem> {
    file_name: String,
    fs: F,
}

impl FsManifestStore<StdFileSystem> {
    pub fn new() -> Self {
        Self::with_file_name(DEFAULT_MANIFEST_FILE)
    }

    /// Use a manifest file name other than `package.json`
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        FsManifestStore {
            file_name: file_name.into(),
            fs: StdFileSystem,
        }
    }
}

impl Default for FsManifestStore<StdFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> FsManifestStore<F> {
    pub fn with_file_system(file_name: impl Into<String>, fs: F) -> Self {
        FsManifestStore {
            file_name: file_name.into(),
            fs,
        }
    }

    /// Path of the manifest inside `directory`
    pub fn manifest_path(&self, directory: &Path) -> PathBuf {
        directory.join(&self.file_name)
    }

    fn load(&self, directory: &Path) -> Result<(Manifest, PathBuf)> {
        if directory.as_os_str().is_empty() {
            return Err(SemtagError::ManifestNotFound {
                path: PathBuf::from(&self.file_name),
            });
        }

        let path = self.manifest_path(directory);
        if !self.fs.exists(&path) {
            return Err(SemtagError::ManifestNotFound { path });
        }

        let text = self
            .fs
            .read_to_string(&path)
            .map_err(|source| SemtagError::ManifestRead {
                path: path.clone(),
                source,
            })?;

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| SemtagError::ManifestParse {
                path: path.clone(),
                source,
            })?;

        let manifest = Manifest::from_value(value, &path)?;
        debug!(path = %path.display(), version = manifest.version(), "read manifest");
        Ok((manifest, path))
    }
}

impl<F: FileSystem> ManifestStore for FsManifestStore<F> {
    fn read(&self, directory: &Path) -> Result<Manifest> {
        self.load(directory).map(|(manifest, _)| manifest)
    }

    fn write(&self, directory: &Path, patch: ManifestPatch) -> Result<Manifest> {
        let (manifest, path) = self.load(directory)?;
        let merged = manifest.merged(patch);

        let contents = merged
            .to_pretty_json()
            .map_err(|e| SemtagError::ManifestWrite {
                path: path.clone(),
                source: e.into(),
            })?;

        // Not atomic: a failed write can leave a truncated file behind
        self.fs
            .write(&path, &contents)
            .map_err(|source| SemtagError::ManifestWrite {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), version = merged.version(), "wrote manifest");
        Ok(merged)
    }
}
