//! Grouping, rendering and assembly of release notes
//!
//! The record types live in the `types` module; this module turns them into
//! Markdown.

mod cli;
mod grouping;
mod releasenotes;
mod render;

pub use cli::{ReleaseNotesArgs, handle_release_notes_command};
pub use grouping::{
    OTHER, PREFIX_COMPONENT, PREFIX_TYPE, PrsByComponent, PrsByType, group_prs,
};
pub use releasenotes::{
    GeneratedReleaseNotes, PullRequestSource, ReleaseInputs, ReleaseNotesGenerator,
    load_pull_requests,
};
pub use render::{
    change_metrics_markdown, changelog_link, expand_template, group_and_render,
    known_issues_markdown, pull_requests_markdown, release_summary,
};
