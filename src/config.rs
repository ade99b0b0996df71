use crate::error::{Result, SemtagError};
use crate::manifest::DEFAULT_MANIFEST_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "semtag.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".semtag.toml";

/// Represents the complete configuration for semtag.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub git: GitConfig,
}

/// Where the version manifest lives inside the project directory.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_file")]
    pub file_name: String,
}

fn default_manifest_file() -> String {
    DEFAULT_MANIFEST_FILE.to_string()
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            file_name: default_manifest_file(),
        }
    }
}

/// How to talk to git.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default)]
    pub backend: GitBackend,

    /// Executable used by the `cli` backend
    #[serde(default = "default_git_program")]
    pub program: String,
}

fn default_git_program() -> String {
    "git".to_string()
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            backend: GitBackend::default(),
            program: default_git_program(),
        }
    }
}

/// Which version control adapter to use
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// Shell out to the git executable
    #[default]
    Cli,
    /// Use libgit2 in-process
    Libgit2,
}

impl FromStr for GitBackend {
    type Err = SemtagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cli" => Ok(GitBackend::Cli),
            "libgit2" | "git2" => Ok(GitBackend::Libgit2),
            other => Err(SemtagError::config(format!(
                "unknown git backend '{}', expected 'cli' or 'libgit2'",
                other
            ))),
        }
    }
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| SemtagError::config(e.to_string()))
}

fn read_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .map_err(|e| SemtagError::config(format!("cannot read {}: {}", path.display(), e)))?;
    parse_config(&text)
}

/// Path of the configuration file that [load_config] would read, if any
pub fn find_config(config_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }

    let local = Path::new(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semtag.toml` in current directory
/// 3. `.semtag.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Errors
/// `Config` if a file exists but cannot be read or parsed. An explicit path
/// that does not exist is also an error.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    match find_config(config_path) {
        Some(path) => read_config(&path),
        None => Ok(Config::default()),
    }
}
