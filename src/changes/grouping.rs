use crate::types::PullRequestInformation;
use std::collections::BTreeMap;

/// Label prefix naming the functional type of a pull request
pub const PREFIX_TYPE: &str = "Type: ";
/// Label prefix naming the affected component
pub const PREFIX_COMPONENT: &str = "Component: ";
/// Bucket used when a pull request carries no type or component label
pub const OTHER: &str = "Other";

/// Pull requests of one type, keyed by component
pub type PrsByComponent = BTreeMap<String, Vec<PullRequestInformation>>;
/// Pull requests keyed by type, then by component
pub type PrsByType = BTreeMap<String, PrsByComponent>;

/// Partitions pull requests into type → component buckets.
///
/// The first `Type: ` label and the first `Component: ` label win; either
/// dimension falls back to `Other`. Pull requests keep their input order
/// inside a bucket.
pub fn group_prs(pull_requests: &[PullRequestInformation]) -> PrsByType {
    let mut by_type = PrsByType::new();

    for pr in pull_requests {
        let mut pr_type = None;
        let mut component = None;

        for label in &pr.labels {
            if pr_type.is_none()
                && let Some(name) = label.strip_prefix(PREFIX_TYPE)
            {
                pr_type = Some(name);
            } else if component.is_none()
                && let Some(name) = label.strip_prefix(PREFIX_COMPONENT)
            {
                component = Some(name);
            }
        }

        by_type
            .entry(display_type(pr_type.unwrap_or(OTHER)))
            .or_default()
            .entry(component.unwrap_or(OTHER).to_string())
            .or_default()
            .push(pr.clone());
    }

    by_type
}

fn display_type(pr_type: &str) -> String {
    match pr_type {
        "Bug" => "Bug fixes".to_string(),
        other => other.to_string(),
    }
}
