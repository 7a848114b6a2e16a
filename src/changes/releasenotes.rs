use super::render::{
    change_metrics_markdown, changelog_link, group_and_render, known_issues_markdown,
    release_summary,
};
use crate::config::Config;
use crate::error::{ReleaseNotesError, Result};
use crate::git::GitRepo;
use crate::github::IssueTracker;
use crate::types::{PullRequestInformation, ReleaseNote, ReleaseVersion};
use crate::{log_debug, log_info, log_warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::Instrument;

const SECTION_SEPARATOR: &str = "------------\n";

impl ReleaseNote {
    /// Writes the release notes to `notes` and, when there is a changelog, the
    /// changelog to `changelog`.
    ///
    /// Sections are only emitted when their text is non-empty; the title line
    /// is always present.
    pub fn generate<N, C>(&self, notes: &mut N, changelog: &mut C) -> Result<()>
    where
        N: Write + ?Sized,
        C: Write + ?Sized,
    {
        writeln!(notes, "# Release of {} {}", self.project.name, self.version)?;

        if !self.announcement.is_empty() {
            writeln!(notes, "{}", self.announcement)?;
        }

        if !self.known_issues.is_empty() {
            writeln!(
                notes,
                "{SECTION_SEPARATOR}## Known Issues\n{}",
                self.known_issues
            )?;
        }

        if !self.changelog.is_empty() {
            writeln!(
                notes,
                "{SECTION_SEPARATOR}The entire changelog for this release can be found [here]({}).",
                changelog_link(&self.project, &self.sub_dir_path)?
            )?;
            if !self.change_metrics.is_empty() {
                writeln!(notes, "{}", self.change_metrics)?;
            }

            writeln!(
                changelog,
                "# Changelog of {} {}\n{}",
                self.project.name, self.version, self.changelog
            )?;
        }

        notes.flush()?;
        changelog.flush()?;
        Ok(())
    }

    /// Renders both artifacts into memory; the changelog is `None` when empty
    pub fn render(&self) -> Result<(String, Option<String>)> {
        let mut notes = Vec::new();
        let mut changelog = Vec::new();
        self.generate(&mut notes, &mut changelog)?;

        let notes = into_utf8(notes)?;
        let changelog = if changelog.is_empty() {
            None
        } else {
            Some(into_utf8(changelog)?)
        };
        Ok((notes, changelog))
    }
}

fn into_utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| ReleaseNotesError::Format(e.to_string()))
}

/// Where the pull requests of a release come from
#[derive(Debug)]
pub enum PullRequestSource {
    /// Scan `from..to` in a local repository and fetch each pull request
    Git {
        repo: GitRepo,
        from: String,
        to: String,
    },
    /// A JSON array of pull requests saved earlier
    File(PathBuf),
    /// Pull requests already in memory
    List(Vec<PullRequestInformation>),
}

/// Inputs of one release-notes run
#[derive(Debug)]
pub struct ReleaseInputs {
    pub version: ReleaseVersion,
    /// File whose content is used verbatim as the announcement
    pub summary: Option<PathBuf>,
    pub pull_requests: PullRequestSource,
}

/// Output of one release-notes run
#[derive(Debug, Clone)]
pub struct GeneratedReleaseNotes {
    pub release_note: ReleaseNote,
    pub notes: String,
    pub changelog: Option<String>,
}

/// Struct responsible for collecting inputs and assembling release notes
pub struct ReleaseNotesGenerator;

impl ReleaseNotesGenerator {
    /// Generates release notes and changelog for one release.
    ///
    /// # Arguments
    ///
    /// * `tracker` - Source of pull request and known issue metadata
    /// * `config` - Project settings used for headings and links
    /// * `inputs` - Version, summary file and pull request source
    ///
    /// # Returns
    ///
    /// The assembled `ReleaseNote` together with both rendered artifacts.
    pub async fn generate(
        tracker: &dyn IssueTracker,
        config: &Config,
        inputs: &ReleaseInputs,
    ) -> Result<GeneratedReleaseNotes> {
        let announcement = match &inputs.summary {
            Some(path) => release_summary(path)?,
            None => String::new(),
        };

        let release = inputs.version.to_string();
        let issues = tracker.known_issues(&release).await?;
        log_info!("Found {} known issues for {}", issues.len(), release);

        let pull_requests = Self::collect_pull_requests(tracker, &inputs.pull_requests)
            .instrument(tracing::info_span!("collect_pull_requests", release = %release))
            .await?;
        if pull_requests.is_empty() {
            log_warn!("No merged pull requests found for {}", release);
        } else {
            log_info!("Collected {} pull requests", pull_requests.len());
        }

        let release_note = ReleaseNote {
            version: release,
            version_underscore: inputs.version.underscored(),
            announcement,
            known_issues: known_issues_markdown(&issues),
            changelog: group_and_render(&pull_requests, &config.project)?,
            change_metrics: change_metrics_markdown(&pull_requests),
            sub_dir_path: inputs.version.sub_dir_path(&config.changelog_dir),
            project: config.project.clone(),
        };

        let (notes, changelog) = release_note.render()?;
        Ok(GeneratedReleaseNotes {
            release_note,
            notes,
            changelog,
        })
    }

    async fn collect_pull_requests(
        tracker: &dyn IssueTracker,
        source: &PullRequestSource,
    ) -> Result<Vec<PullRequestInformation>> {
        match source {
            PullRequestSource::Git { repo, from, to } => {
                let numbers = repo.merged_pull_requests(from, to)?;
                let mut pull_requests = Vec::with_capacity(numbers.len());
                for number in numbers {
                    log_debug!("Fetching pull request #{}", number);
                    pull_requests.push(tracker.pull_request(number).await?);
                }
                Ok(pull_requests)
            }
            PullRequestSource::File(path) => load_pull_requests(path),
            PullRequestSource::List(pull_requests) => Ok(pull_requests.clone()),
        }
    }
}

/// Loads pull requests from a JSON array of `{number, title, labels, author}`
pub fn load_pull_requests(path: &Path) -> Result<Vec<PullRequestInformation>> {
    let content = fs::read_to_string(path).map_err(|source| ReleaseNotesError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| {
        ReleaseNotesError::InvalidInput(format!(
            "'{}' is not a JSON list of pull requests: {e}",
            path.display()
        ))
    })
}
