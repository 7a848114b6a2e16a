use super::{IssueTracker, known_issue_label};
use crate::config::Config;
use crate::error::{ReleaseNotesError, Result};
use crate::log_debug;
use crate::types::{Author, KnownIssue, Label, PullRequestInformation};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

const USER_AGENT: &str = concat!("release-notes/", env!("CARGO_PKG_VERSION"));

/// Issue tracker backed by the GitHub REST API
pub struct GitHubClient {
    client: Client,
    api_url: Url,
    owner: String,
    repo: String,
    token: Option<String>,
}

/// Subset of the pull request payload the notes need
#[derive(Deserialize, Debug)]
struct PullRequestPayload {
    number: u64,
    title: String,
    #[serde(default)]
    labels: Vec<Label>,
    user: Option<Author>,
}

impl From<PullRequestPayload> for PullRequestInformation {
    fn from(payload: PullRequestPayload) -> Self {
        Self {
            number: payload.number,
            title: payload.title,
            labels: payload.labels,
            author: payload.user,
        }
    }
}

/// Subset of the issue payload; the issues endpoint also lists pull requests
#[derive(Deserialize, Debug)]
struct IssuePayload {
    number: u64,
    title: String,
    pull_request: Option<serde_json::Value>,
}

impl GitHubClient {
    /// Creates a client for `repository` (`owner/repo`) against `api_url`
    pub fn new(api_url: &str, repository: &str, token: Option<String>) -> Result<Self> {
        let api_url = Url::parse(api_url).map_err(|e| {
            ReleaseNotesError::InvalidInput(format!("invalid API URL '{api_url}': {e}"))
        })?;
        if api_url.cannot_be_a_base() {
            return Err(ReleaseNotesError::InvalidInput(format!(
                "API URL '{api_url}' cannot be used as a base"
            )));
        }

        let (owner, repo) = repository
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
            .ok_or_else(|| {
                ReleaseNotesError::InvalidInput(format!(
                    "repository '{repository}' must be in owner/repo form"
                ))
            })?;

        Ok(Self {
            client: Client::new(),
            api_url,
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Creates a client from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.api_url,
            &config.project.repository,
            config.effective_token(),
        )
    }

    /// `{api}/repos/{owner}/{repo}/{segments...}`
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str()])
                .extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        log_debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ReleaseNotesError::NotFound(format!(
                "{what} in {}/{}",
                self.owner, self.repo
            )));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ReleaseNotesError::Network(format!(
                "request for {what} failed with status {status}: {text}"
            )));
        }

        response.json::<T>().await.map_err(|e| {
            ReleaseNotesError::Network(format!("unexpected response body for {what}: {e}"))
        })
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn pull_request(&self, number: u64) -> Result<PullRequestInformation> {
        let url = self.endpoint(&["pulls", &number.to_string()]);
        let payload: PullRequestPayload = self
            .get_json(url, &format!("pull request #{number}"))
            .await?;
        Ok(payload.into())
    }

    async fn known_issues(&self, release: &str) -> Result<Vec<KnownIssue>> {
        let label = known_issue_label(release);
        let mut url = self.endpoint(&["issues"]);
        url.query_pairs_mut()
            .append_pair("state", "open")
            .append_pair("labels", &label)
            .append_pair("per_page", "100");

        let issues: Vec<IssuePayload> = self
            .get_json(url, &format!("issues labelled '{label}'"))
            .await?;

        Ok(issues
            .into_iter()
            .filter(|issue| issue.pull_request.is_none())
            .map(|issue| KnownIssue::new(issue.number, issue.title))
            .collect())
    }
}
