//! release-notes - release notes and changelogs from merged pull requests
//!
//! This library collects merged pull request metadata, groups it by `Type:` and
//! `Component:` labels and renders Markdown release notes and changelogs.

#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic

pub mod changes;
pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod logger;
pub mod types;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use config::Config;
pub use error::ReleaseNotesError;
pub use github::{GitHubClient, IssueTracker};

// Re-exports from types module
pub use types::{KnownIssue, Label, Project, PullRequestInformation, ReleaseNote, ReleaseVersion};
