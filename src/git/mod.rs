//! Version control abstraction layer
//!
//! The [VersionControl] trait covers the handful of git operations semtag
//! needs. Implementations:
//!
//! - [cli::GitCli]: shells out to the `git` executable (default)
//! - [repository::Git2Repository]: uses libgit2 through the `git2` crate
//! - [mock::MockRepository]: records calls, for tests
//!
//! All calls block until the underlying tool finishes; no timeout is imposed.

pub mod cli;
pub mod mock;
pub mod repository;

pub use cli::GitCli;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::{Result, SemtagError};

/// Common version control operations
///
/// Only [VersionControl::is_available] is infallible. The remaining raw
/// operations report tool failures as errors and leave the interpretation
/// to callers.
pub trait VersionControl {
    /// Whether the tool can be invoked at all. Never fails.
    fn is_available(&self) -> bool;

    /// Whether the working tree matches the index.
    ///
    /// Implementations return `false` both for "differences found" and for
    /// any failure while checking.
    fn has_no_unstaged_changes(&self) -> bool;

    /// All tag names pointing exactly at the current commit
    fn tags_at_head(&self) -> Result<Vec<String>>;

    /// Create a lightweight tag named `name` on the current commit
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Fail with an environment error unless the tool is installed
    fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(SemtagError::git_not_installed())
        }
    }

    /// Whether the working tree has no uncommitted changes.
    ///
    /// # Errors
    /// `Environment` when the tool is not installed.
    fn is_working_tree_clean(&self) -> Result<bool> {
        self.ensure_available()?;
        Ok(self.has_no_unstaged_changes())
    }
}

impl<T: VersionControl + ?Sized> VersionControl for &T {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn has_no_unstaged_changes(&self) -> bool {
        (**self).has_no_unstaged_changes()
    }

    fn tags_at_head(&self) -> Result<Vec<String>> {
        (**self).tags_at_head()
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        (**self).create_tag(name)
    }
}

impl<T: VersionControl + ?Sized> VersionControl for Box<T> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn has_no_unstaged_changes(&self) -> bool {
        (**self).has_no_unstaged_changes()
    }

    fn tags_at_head(&self) -> Result<Vec<String>> {
        (**self).tags_at_head()
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        (**self).create_tag(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_check_requires_tool() {
        let repo = MockRepository::unavailable();
        let err = repo.is_working_tree_clean().unwrap_err();
        assert!(matches!(err, SemtagError::Environment(_)));
        assert_eq!(repo.diff_calls(), 0);
    }

    #[test]
    fn test_clean_check_reports_state() {
        let repo = MockRepository::new();
        assert!(repo.is_working_tree_clean().unwrap());
        assert_eq!(repo.availability_calls(), 1);
        assert_eq!(repo.diff_calls(), 1);

        let dirty = MockRepository::new().with_dirty_tree();
        assert!(!dirty.is_working_tree_clean().unwrap());
    }

    #[test]
    fn test_forwarding_through_box() {
        let boxed: Box<dyn VersionControl> = Box::new(MockRepository::new().with_head_tags(["1.0.0"]));
        assert_eq!(boxed.tags_at_head().unwrap(), vec!["1.0.0".to_string()]);
    }
}
