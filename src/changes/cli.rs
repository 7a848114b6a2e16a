use super::releasenotes::{
    GeneratedReleaseNotes, PullRequestSource, ReleaseInputs, ReleaseNotesGenerator,
};
use crate::common::CommonParams;
use crate::config::Config;
use crate::git::GitRepo;
use crate::github::GitHubClient;
use crate::types::ReleaseVersion;
use crate::{log_debug, ui};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments of a release-notes run
#[derive(Args, Clone, Debug)]
pub struct ReleaseNotesArgs {
    /// Version being released, e.g. v12.0.0
    #[arg(long = "version", value_name = "VERSION")]
    pub version: String,

    /// Starting Git reference (the previous release tag or branch)
    #[arg(long, required_unless_present = "pr_file")]
    pub from: Option<String>,

    /// Ending Git reference. Defaults to HEAD if not specified.
    #[arg(long, default_value = "HEAD")]
    pub to: String,

    /// Markdown file used verbatim as the release announcement
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,

    /// Read pull requests from a JSON file instead of scanning Git history
    #[arg(long = "pr-file", value_name = "FILE", conflicts_with = "from")]
    pub pr_file: Option<PathBuf>,

    /// Where to write the release notes (defaults to <release dir>/release_notes.md)
    #[arg(long = "notes-file", value_name = "FILE")]
    pub notes_file: Option<PathBuf>,

    /// Where to write the changelog (defaults to <release dir>/changelog.md)
    #[arg(long = "changelog-file", value_name = "FILE")]
    pub changelog_file: Option<PathBuf>,

    /// Print the release notes, then the changelog, to stdout instead of writing files
    #[arg(short, long)]
    pub print: bool,
}

/// Handles the release notes generation command.
///
/// Loads configuration, builds the GitHub-backed tracker, delegates to
/// `ReleaseNotesGenerator` and writes (or prints) the artifacts.
pub async fn handle_release_notes_command(
    common: CommonParams,
    args: ReleaseNotesArgs,
) -> Result<()> {
    let mut config = Config::load()?;
    common.apply_to_config(&mut config);

    let version = ReleaseVersion::parse(&args.version)?;
    let tracker = GitHubClient::from_config(&config)?;

    let pull_requests = match (&args.pr_file, &args.from) {
        (Some(path), _) => PullRequestSource::File(path.clone()),
        (None, Some(from)) => {
            ui::print_info(&format!("Scanning merged pull requests in {from}..{}", args.to));
            PullRequestSource::Git {
                repo: GitRepo::from_current_dir().context("Failed to open Git repository")?,
                from: from.clone(),
                to: args.to.clone(),
            }
        }
        (None, None) => anyhow::bail!("either --from or --pr-file is required"),
    };

    let inputs = ReleaseInputs {
        version,
        summary: args.summary.clone(),
        pull_requests,
    };

    let spinner = ui::create_spinner(&format!(
        "Generating release notes for {}...",
        inputs.version
    ));
    let generated = ReleaseNotesGenerator::generate(&tracker, &config, &inputs).await;
    spinner.finish_and_clear();
    let generated = generated.context("Failed to generate release notes")?;

    if args.print {
        print!("{}", printed_output(&generated));
        return Ok(());
    }

    write_artifacts(&generated, &args)
}

/// Notes followed by the changelog, separated by a blank line
fn printed_output(generated: &GeneratedReleaseNotes) -> String {
    match &generated.changelog {
        Some(changelog) => format!("{}\n{}", generated.notes, changelog),
        None => generated.notes.clone(),
    }
}

fn write_artifacts(generated: &GeneratedReleaseNotes, args: &ReleaseNotesArgs) -> Result<()> {
    let release_dir = PathBuf::from(&generated.release_note.sub_dir_path);

    let notes_path = args
        .notes_file
        .clone()
        .unwrap_or_else(|| release_dir.join("release_notes.md"));
    write_file(&notes_path, &generated.notes)?;
    ui::print_success(&format!(
        "Release notes written to {}",
        notes_path.display().to_string().bright_green()
    ));

    if let Some(changelog) = &generated.changelog {
        let changelog_path = args
            .changelog_file
            .clone()
            .unwrap_or_else(|| release_dir.join("changelog.md"));
        write_file(&changelog_path, changelog)?;
        ui::print_success(&format!(
            "Changelog written to {}",
            changelog_path.display().to_string().bright_green()
        ));
    } else {
        log_debug!("Empty changelog, skipping {:?}", args.changelog_file);
        ui::print_warning("No merged pull requests found, changelog was not written");
    }

    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
