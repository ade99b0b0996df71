use crate::error::{Result, SemtagError};
use crate::git::VersionControl;
use git2::{ObjectType, Oid, Repository as Git2Repo};
use std::path::Path;
use tracing::{debug, warn};

/// Version control through libgit2, no `git` executable needed
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_commit_oid(&self) -> Result<Oid> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.id())
    }

    /// Commit a tag ultimately points at, handling annotated tags
    fn tag_target(&self, tag_name: &str) -> Result<Option<Oid>> {
        let reference = match self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
            Ok(reference) => reference,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match reference.peel(ObjectType::Commit) {
            Ok(object) => Ok(Some(object.id())),
            // tags on trees or blobs never match a commit
            Err(_) => Ok(None),
        }
    }
}

impl VersionControl for Git2Repository {
    fn is_available(&self) -> bool {
        true
    }

    fn has_no_unstaged_changes(&self) -> bool {
        match self.repo.diff_index_to_workdir(None, None) {
            Ok(diff) => diff.deltas().len() == 0,
            Err(e) => {
                warn!(error = %e, "cannot diff working tree");
                false
            }
        }
    }

    fn tags_at_head(&self) -> Result<Vec<String>> {
        let head = self.head_commit_oid()?;
        let names = self.repo.tag_names(None)?;

        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            if self.tag_target(name)? == Some(head) {
                tags.push(name.to_string());
            }
        }

        debug!(?tags, "tags at HEAD");
        Ok(tags)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| SemtagError::tag_creation(format!("Cannot resolve HEAD: {}", e)))?;

        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .map_err(|e| SemtagError::tag_creation(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }
}
