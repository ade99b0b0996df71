//! The bump and tag workflows
//!
//! Each workflow returns a [WorkflowOutcome] instead of exiting, so the
//! decision logic can be exercised without terminating the process. Only
//! `main` turns an outcome into an exit code.

use std::path::{Path, PathBuf};

use crate::bump::{bump, BumpReport};
use crate::domain::BumpGranularity;
use crate::error::Result;
use crate::git::VersionControl;
use crate::manifest::ManifestStore;
use crate::release::is_latest_version;
use crate::tag::create_tag;

pub const MISSING_DIRECTORY: &str =
    "No manifest directory provided. Use \".\" for the current working directory.";

pub const DIRTY_WORKING_TREE: &str =
    "Working directory is dirty. Commit or stash before running tag";

pub const ALREADY_TAGGED: &str = "Not tagging because the release is already tagged with the current version. If you want to tag a new version, bump before tagging.";

/// Arguments for the bump workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BumpWorkflowArgs {
    /// Directory holding the manifest
    pub directory: Option<PathBuf>,

    /// Remaining free-form arguments; `major`, `minor` or `patch` select the granularity
    pub granularity_args: Vec<String>,
}

/// Arguments for the tag workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagWorkflowArgs {
    /// Directory holding the manifest
    pub directory: Option<PathBuf>,

    /// Version to write into the manifest before tagging
    pub version: Option<String>,
}

/// How loudly an abort should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Result of running a workflow to the end
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// The manifest version was bumped
    Bumped(BumpReport),

    /// A tag was created
    Tagged { tag: String },

    /// Stopped early with a process exit code
    Abort {
        code: i32,
        severity: Severity,
        message: String,
    },
}

impl WorkflowOutcome {
    fn abort(code: i32, severity: Severity, message: impl Into<String>) -> Self {
        WorkflowOutcome::Abort {
            code,
            severity,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            WorkflowOutcome::Bumped(_) | WorkflowOutcome::Tagged { .. } => 0,
            WorkflowOutcome::Abort { code, .. } => *code,
        }
    }
}

fn non_empty(directory: Option<&Path>) -> Option<&Path> {
    directory.filter(|dir| !dir.as_os_str().is_empty())
}

/// Bump the manifest version unless it is already tagged at HEAD.
///
/// A dirty working tree never counts as tagged, so it still bumps.
pub fn run_bump_workflow<V, M>(vcs: &V, store: &M, args: &BumpWorkflowArgs) -> Result<WorkflowOutcome>
where
    V: VersionControl + ?Sized,
    M: ManifestStore + ?Sized,
{
    let Some(directory) = non_empty(args.directory.as_deref()) else {
        return Ok(WorkflowOutcome::abort(1, Severity::Error, MISSING_DIRECTORY));
    };

    if is_latest_version(vcs, store, directory)? {
        let version = store.read(directory)?.version().to_string();
        return Ok(WorkflowOutcome::abort(
            0,
            Severity::Warning,
            format!("Version {} is already tagged at HEAD; not bumping.", version),
        ));
    }

    let granularity = BumpGranularity::from_args(&args.granularity_args);
    let report = bump(store, directory, granularity)?;
    Ok(WorkflowOutcome::Bumped(report))
}

/// Tag the current commit with the manifest version after checking preconditions.
///
/// Checks, in order: git is installed, a directory was given, the working
/// tree is clean, and the current version is not already tagged.
pub fn run_tag_workflow<V, M>(vcs: &V, store: &M, args: &TagWorkflowArgs) -> Result<WorkflowOutcome>
where
    V: VersionControl + ?Sized,
    M: ManifestStore + ?Sized,
{
    vcs.ensure_available()?;

    let Some(directory) = non_empty(args.directory.as_deref()) else {
        return Ok(WorkflowOutcome::abort(1, Severity::Error, MISSING_DIRECTORY));
    };

    if !vcs.is_working_tree_clean()? {
        return Ok(WorkflowOutcome::abort(1, Severity::Warning, DIRTY_WORKING_TREE));
    }

    if is_latest_version(vcs, store, directory)? {
        return Ok(WorkflowOutcome::abort(0, Severity::Warning, ALREADY_TAGGED));
    }

    let tag = create_tag(vcs, store, directory, args.version.as_deref())?;
    Ok(WorkflowOutcome::Tagged { tag })
}
