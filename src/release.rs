use crate::error::Result;
use crate::git::VersionControl;
use crate::manifest::ManifestStore;
use std::path::Path;
use tracing::{debug, warn};

/// Whether the manifest's version is already released at the current commit.
///
/// A dirty working tree is never the released state, so it returns `false`
/// without reading the manifest or querying tags. Otherwise the manifest
/// version must appear verbatim among the tags pointing at HEAD. A failing
/// tag query counts as "not tagged" and is only logged.
///
/// # Errors
/// `Environment` when git is missing, or any manifest read error.
pub fn is_latest_version<V, M>(vcs: &V, store: &M, directory: &Path) -> Result<bool>
where
    V: VersionControl + ?Sized,
    M: ManifestStore + ?Sized,
{
    if !vcs.is_working_tree_clean()? {
        debug!("working tree is dirty");
        return Ok(false);
    }

    let manifest = store.read(directory)?;
    let version = manifest.version();

    match vcs.tags_at_head() {
        Ok(tags) => Ok(tags.iter().any(|tag| tag == version)),
        Err(e) => {
            warn!(error = %e, "could not list tags at HEAD, treating version as untagged");
            Ok(false)
        }
    }
}
