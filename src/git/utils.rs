use regex::Regex;
use std::sync::LazyLock;

static MERGE_COMMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Merge pull request #(\d+)\b").expect("merge commit pattern should compile")
});

static SQUASH_COMMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(#(\d+)\)\s*$").expect("squash commit pattern should compile")
});

/// Extracts the pull request number a commit was merged from.
///
/// Only the summary line is inspected. Recognizes merge commits
/// (`Merge pull request #123 from ...`) and squash merges that end with
/// `(#123)`.
///
/// # Returns
///
/// The pull request number, or `None` for commits that were pushed directly.
pub fn extract_pull_request_number(message: &str) -> Option<u64> {
    let summary = message.lines().next()?.trim();

    MERGE_COMMIT
        .captures(summary)
        .or_else(|| SQUASH_COMMIT.captures(summary))
        .and_then(|captures| captures.get(1))
        .and_then(|number| number.as_str().parse().ok())
}
