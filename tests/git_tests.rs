
use release_notes::ReleaseNotesError;
use release_notes::git::GitRepo;
use test_utils::{commit_file, setup_git_repo, setup_repo_with_pull_requests};

#[test]
fn test_merged_pull_requests_between_tag_and_head() {
    let (_temp_dir, git_repo) = setup_repo_with_pull_requests();

    let numbers = git_repo
        .merged_pull_requests("v1.0.0", "HEAD")
        .expect("Failed to scan history");

    // #101 appears twice, #999 is only mentioned in a commit body
    assert_eq!(numbers, vec![101, 102, 205]);
}

#[test]
fn test_merged_pull_requests_respects_upper_bound() {
    let (temp_dir, repo) = setup_git_repo();
    commit_file(&repo, temp_dir.path(), "a.txt", "First change (#1)");
    let middle = commit_file(&repo, temp_dir.path(), "b.txt", "Second change (#2)");
    commit_file(&repo, temp_dir.path(), "c.txt", "Third change (#3)");

    let git_repo = GitRepo::new(temp_dir.path());
    let numbers = git_repo
        .merged_pull_requests("v1.0.0", &middle.to_string())
        .expect("Failed to scan history");

    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn test_no_pull_requests_when_range_is_empty() {
    let (_temp_dir, git_repo) = setup_repo_with_pull_requests();

    let numbers = git_repo
        .merged_pull_requests("HEAD", "HEAD")
        .expect("Failed to scan history");

    assert!(numbers.is_empty());
}

#[test]
fn test_unknown_reference_is_a_git_error() {
    let (_temp_dir, git_repo) = setup_repo_with_pull_requests();

    let err = git_repo
        .merged_pull_requests("v0.0.1", "HEAD")
        .expect_err("unknown tag should fail");

    assert!(matches!(err, ReleaseNotesError::Git(_)));
}

#[test]
fn test_open_repo_outside_repository_fails() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temporary directory");
    let git_repo = GitRepo::new(temp_dir.path());

    assert!(matches!(git_repo.open_repo(), Err(ReleaseNotesError::Git(_))));
    assert_eq!(git_repo.repo_path(), &temp_dir.path().to_path_buf());
}
