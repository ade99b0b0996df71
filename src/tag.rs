use crate::domain::is_strict_semver;
use crate::error::{Result, SemtagError};
use crate::git::VersionControl;
use crate::manifest::{version_patch, ManifestStore};
use std::path::Path;
use tracing::debug;

fn verify_version(version: &str) -> Result<()> {
    if is_strict_semver(version) {
        Ok(())
    } else {
        Err(SemtagError::validation(format!(
            "version '{}' must be in n.n.n semver format",
            version
        )))
    }
}

/// Tag the current commit with the manifest's version.
///
/// With `explicit_version`, the manifest is first updated to it. Either way
/// the version must be strict `n.n.n`; nothing is written and no tag is
/// created otherwise. Returns the created tag name.
///
/// # Errors
/// `Environment` when git is missing, `Validation` for a malformed version,
/// manifest errors, and `TagCreation` when git refuses the tag.
pub fn create_tag<V, M>(
    vcs: &V,
    store: &M,
    directory: &Path,
    explicit_version: Option<&str>,
) -> Result<String>
where
    V: VersionControl + ?Sized,
    M: ManifestStore + ?Sized,
{
    vcs.ensure_available()?;

    let version = match explicit_version {
        Some(version) => {
            verify_version(version)?;
            store.write(directory, version_patch(version))?;
            version.to_string()
        }
        None => {
            let version = store.read(directory)?.version().to_string();
            verify_version(&version)?;
            version
        }
    };

    debug!(tag = %version, "creating tag");
    vcs.create_tag(&version).map_err(|e| match e {
        SemtagError::TagCreation(_) => e,
        other => SemtagError::tag_creation(other.to_string()),
    })?;

    Ok(version)
}
