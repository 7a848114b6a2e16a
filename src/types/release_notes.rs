//! Release note aggregate and the settings it is rendered against

use crate::error::{ReleaseNotesError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v(\d+)\.(\d+)\.(\d+)(-rc\d+)?$").expect("version pattern should compile")
});

/// Identity of the project the notes are written for
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Project {
    /// Display name used in headings
    #[serde(default = "default_project_name")]
    pub name: String,
    /// `owner/repo` slug on the hosting service
    #[serde(default = "default_repository")]
    pub repository: String,
    /// Branch the changelog link points at
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Link template for a pull request; `{repository}` and `{number}` are expanded
    #[serde(default = "default_pull_request_url")]
    pub pull_request_url: String,
    /// Link template for the committed changelog; `{repository}`, `{branch}`
    /// and `{path}` are expanded
    #[serde(default = "default_changelog_url")]
    pub changelog_url: String,
}

fn default_project_name() -> String {
    "Vitess".to_string()
}

fn default_repository() -> String {
    "vitessio/vitess".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_pull_request_url() -> String {
    "https://github.com/{repository}/pull/{number}".to_string()
}

fn default_changelog_url() -> String {
    "https://github.com/{repository}/blob/{branch}/{path}/changelog.md".to_string()
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            repository: default_repository(),
            branch: default_branch(),
            pull_request_url: default_pull_request_url(),
            changelog_url: default_changelog_url(),
        }
    }
}

/// A validated release version such as `v12.0.0` or `v15.0.0-rc1`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseVersion {
    raw: String,
    major: u64,
    minor: u64,
    patch: u64,
    pre_release: Option<String>,
}

impl ReleaseVersion {
    pub fn parse(version: &str) -> Result<Self> {
        let captures = VERSION_PATTERN.captures(version).ok_or_else(|| {
            ReleaseNotesError::InvalidInput(format!(
                "version '{version}' must look like v12.0.0 or v12.0.0-rc1"
            ))
        })?;

        let number = |idx: usize| -> Result<u64> {
            captures
                .get(idx)
                .map(|m| m.as_str())
                .unwrap_or_default()
                .parse()
                .map_err(|e| ReleaseNotesError::InvalidInput(format!("version '{version}': {e}")))
        };

        Ok(Self {
            raw: version.to_string(),
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            pre_release: captures
                .get(4)
                .map(|m| m.as_str().trim_start_matches('-').to_string()),
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    /// `12.0.0` or `12.0.0-rc1`
    pub fn without_prefix(&self) -> &str {
        self.raw.trim_start_matches('v')
    }

    /// `12_0_0` or `12_0_0_rc1`, used for Markdown anchors
    pub fn underscored(&self) -> String {
        let mut out = format!("{}_{}_{}", self.major, self.minor, self.patch);
        if let Some(pre) = &self.pre_release {
            out.push('_');
            out.push_str(pre);
        }
        out
    }

    /// Directory the release artifacts live in, e.g. `changelog/12.0/12.0.0`
    pub fn sub_dir_path(&self, changelog_dir: &str) -> String {
        format!(
            "{}/{}.0/{}",
            changelog_dir.trim_end_matches('/'),
            self.major,
            self.without_prefix()
        )
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Everything needed to render one release's notes and changelog.
///
/// Built once from the collected inputs and consumed once by `generate`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReleaseNote {
    pub version: String,
    pub version_underscore: String,
    pub announcement: String,
    pub known_issues: String,
    pub changelog: String,
    pub change_metrics: String,
    pub sub_dir_path: String,
    pub project: Project,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_release_and_candidate_versions() {
        let ga = ReleaseVersion::parse("v12.0.0").expect("ga version");
        assert_eq!(ga.major(), 12);
        assert_eq!(ga.underscored(), "12_0_0");
        assert_eq!(ga.sub_dir_path("changelog"), "changelog/12.0/12.0.0");

        let rc = ReleaseVersion::parse("v15.1.2-rc1").expect("rc version");
        assert_eq!(rc.underscored(), "15_1_2_rc1");
        assert_eq!(rc.sub_dir_path("changelog/"), "changelog/15.0/15.1.2-rc1");
        assert_eq!(rc.to_string(), "v15.1.2-rc1");
    }

    #[test]
    fn rejects_malformed_versions() {
        for bad in ["12.0.0", "v12.0", "v12.0.0-beta", ""] {
            assert!(
                matches!(
                    ReleaseVersion::parse(bad),
                    Err(ReleaseNotesError::InvalidInput(_))
                ),
                "{bad} should be rejected"
            );
        }
    }
}
