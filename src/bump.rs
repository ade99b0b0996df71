use crate::domain::{BumpGranularity, Version};
use crate::error::Result;
use crate::manifest::{version_patch, ManifestStore};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Versions before and after a bump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpReport {
    /// The manifest's version string as it was, possibly malformed
    pub previous: String,
    pub next: Version,
}

impl fmt::Display for BumpReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.previous, self.next)
    }
}

/// Increment the manifest's version and persist it.
///
/// A version that is not strict `n.n.n` is bumped as if it were `0.0.0`.
/// The tagging path rejects such versions instead. A component already at
/// `u64::MAX` fails with `Validation` and nothing is written.
pub fn bump<M>(store: &M, directory: &Path, granularity: BumpGranularity) -> Result<BumpReport>
where
    M: ManifestStore + ?Sized,
{
    let manifest = store.read(directory)?;
    let previous = manifest.version().to_string();

    let current = Version::parse(&previous).unwrap_or_else(|e| {
        warn!(version = %previous, error = %e, "bumping from 0.0.0");
        Version::default()
    });
    let next = current.bump(granularity)?;
    debug!(%granularity, from = %previous, to = %next, "bumped version");

    store.write(directory, version_patch(next.to_string()))?;

    Ok(BumpReport { previous, next })
}
