//! Record types flowing through the release-notes pipeline
//!
//! This module consolidates the data the tool collects and renders:
//! - Pull requests and their labels
//! - Known issues
//! - The release note aggregate and project settings

mod pull_request;
mod release_notes;

// Pull request types
pub use pull_request::{Author, KnownIssue, Label, PullRequestInformation};

// Release note types
pub use release_notes::{Project, ReleaseNote, ReleaseVersion};
