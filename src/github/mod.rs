//! Access to the issue tracker that holds pull-request and issue metadata

mod client;

pub use client::GitHubClient;

use crate::error::Result;
use crate::types::{KnownIssue, PullRequestInformation};
use async_trait::async_trait;

/// Label prefix marking an issue as known for a major release
pub const KNOWN_ISSUE_LABEL_PREFIX: &str = "Known issue: ";

/// Read-only view of a hosted repository's pull requests and issues.
///
/// Implementations are called sequentially; nothing here is retried.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetches title, labels and author of one pull request
    async fn pull_request(&self, number: u64) -> Result<PullRequestInformation>;

    /// Fetches the open issues documented as known for `release`
    async fn known_issues(&self, release: &str) -> Result<Vec<KnownIssue>>;
}

/// Builds the tracker label for a release, e.g. `v12.0.0` → `Known issue: v12`
pub fn known_issue_label(release: &str) -> String {
    let major = release.split_once('.').map_or(release, |(major, _)| major);
    format!("{KNOWN_ISSUE_LABEL_PREFIX}{major}")
}
