// tests/git2_backend_test.rs
//
// End-to-end runs against a real repository built with libgit2, so no git
// executable is needed.
use git2::{Repository, Signature};
use semtag::cli::{
    run_bump_workflow, run_tag_workflow, BumpWorkflowArgs, TagWorkflowArgs, WorkflowOutcome,
};
use semtag::git::{Git2Repository, VersionControl};
use semtag::manifest::{FsManifestStore, ManifestStore};
use semtag::release::is_latest_version;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn commit_all(repo: &Repository, message: &str) {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now("Test", "test@example.com").unwrap();
    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<_> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap();
}

fn project_with_version(version: &str) -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    fs::write(
        dir.path().join("package.json"),
        format!("{{\n  \"name\": \"demo\",\n  \"version\": \"{}\"\n}}\n", version),
    )
    .unwrap();
    commit_all(&repo, "initial");
    (dir, repo)
}

fn tag_args(dir: &Path) -> TagWorkflowArgs {
    TagWorkflowArgs {
        directory: Some(dir.to_path_buf()),
        version: None,
    }
}

#[test]
fn test_untagged_then_tagged() {
    let (dir, repo) = project_with_version("1.2.3");
    let vcs = Git2Repository::from_git2(repo);
    let store = FsManifestStore::new();

    assert!(!is_latest_version(&vcs, &store, dir.path()).unwrap());

    let outcome = run_tag_workflow(&vcs, &store, &tag_args(dir.path())).unwrap();
    assert_eq!(
        outcome,
        WorkflowOutcome::Tagged {
            tag: "1.2.3".to_string()
        }
    );

    assert!(is_latest_version(&vcs, &store, dir.path()).unwrap());
    assert_eq!(vcs.tags_at_head().unwrap(), vec!["1.2.3"]);

    // second run is a clean no-op
    let again = run_tag_workflow(&vcs, &store, &tag_args(dir.path())).unwrap();
    assert_eq!(again.exit_code(), 0);
    assert!(matches!(again, WorkflowOutcome::Abort { .. }));
}

#[test]
fn test_dirty_manifest_blocks_tagging() {
    let (dir, repo) = project_with_version("1.2.3");
    let vcs = Git2Repository::from_git2(repo);
    let store = FsManifestStore::new();

    store
        .write(dir.path(), semtag::manifest::version_patch("1.2.10"))
        .unwrap();

    let outcome = run_tag_workflow(&vcs, &store, &tag_args(dir.path())).unwrap();
    assert_eq!(outcome.exit_code(), 1);
    assert!(vcs.tags_at_head().unwrap().is_empty());
}

#[test]
fn test_bump_commit_tag_cycle() {
    let (dir, repo) = project_with_version("0.9.0");
    let store = FsManifestStore::new();

    {
        let vcs = Git2Repository::open(dir.path()).unwrap();
        vcs.create_tag("0.9.0").unwrap();

        // already released: bump is skipped
        let skipped = run_bump_workflow(
            &vcs,
            &store,
            &BumpWorkflowArgs {
                directory: Some(dir.path().to_path_buf()),
                granularity_args: vec!["minor".to_string()],
            },
        )
        .unwrap();
        assert!(matches!(skipped, WorkflowOutcome::Abort { code: 0, .. }));
        assert_eq!(store.read(dir.path()).unwrap().version(), "0.9.0");
    }

    fs::write(dir.path().join("CHANGELOG"), "work\n").unwrap();
    commit_all(&repo, "more work");

    let vcs = Git2Repository::from_git2(repo);
    let bumped = run_bump_workflow(
        &vcs,
        &store,
        &BumpWorkflowArgs {
            directory: Some(dir.path().to_path_buf()),
            granularity_args: vec!["minor".to_string()],
        },
    )
    .unwrap();
    match bumped {
        WorkflowOutcome::Bumped(report) => assert_eq!(report.to_string(), "0.9.0 --> 0.10.0"),
        other => panic!("unexpected outcome: {:?}", other),
    }

    let repo = Repository::open(dir.path()).unwrap();
    commit_all(&repo, "release 0.10.0");

    let tagged = run_tag_workflow(&vcs, &store, &tag_args(dir.path())).unwrap();
    assert_eq!(
        tagged,
        WorkflowOutcome::Tagged {
            tag: "0.10.0".to_string()
        }
    );
}
