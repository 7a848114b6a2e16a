use super::grouping::{PrsByType, group_prs};
use crate::error::{ReleaseNotesError, Result};
use crate::log_debug;
use crate::types::{KnownIssue, Project, PullRequestInformation};
use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

/// Reads the release summary file verbatim; it becomes the announcement
pub fn release_summary(path: &Path) -> Result<String> {
    log_debug!("Reading release summary from {}", path.display());
    fs::read_to_string(path).map_err(|source| ReleaseNotesError::Input {
        path: path.to_path_buf(),
        source,
    })
}

/// Expands `{name}` placeholders in `template` from `fields`.
///
/// `{{` and `}}` produce literal braces. A placeholder with no matching field,
/// an unclosed `{` or a stray `}` is a format error.
pub fn expand_template(template: &str, fields: &[(&str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for next in chars.by_ref() {
                    if next == '}' {
                        closed = true;
                        break;
                    }
                    name.push(next);
                }
                if !closed {
                    return Err(ReleaseNotesError::Format(format!(
                        "unclosed placeholder '{{{name}' in template '{template}'"
                    )));
                }
                let value = fields
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| {
                        ReleaseNotesError::Format(format!(
                            "template '{template}' references missing field '{name}'"
                        ))
                    })?;
                out.push_str(value);
            }
            '}' => {
                return Err(ReleaseNotesError::Format(format!(
                    "unmatched '}}' in template '{template}'"
                )));
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Renders grouped pull requests as Markdown.
///
/// Types become `###` headings and components `####` headings, both in
/// alphabetical order; each pull request is one bullet linking to its page.
pub fn pull_requests_markdown(prs_by_type: &PrsByType, project: &Project) -> Result<String> {
    let mut formatted = String::new();

    for (pr_type, prs_by_component) in prs_by_type {
        writeln!(formatted, "### {pr_type}")?;
        for (component, prs) in prs_by_component {
            writeln!(formatted, "#### {component}")?;
            for pr in prs {
                let number = pr.number.to_string();
                let url = expand_template(
                    &project.pull_request_url,
                    &[
                        ("repository", project.repository.as_str()),
                        ("number", number.as_str()),
                    ],
                )?;
                writeln!(formatted, " * {} [#{}]({})", pr.title, pr.number, url)?;
            }
        }
    }

    Ok(formatted)
}

/// Link to the changelog committed under `sub_dir_path`
pub fn changelog_link(project: &Project, sub_dir_path: &str) -> Result<String> {
    expand_template(
        &project.changelog_url,
        &[
            ("repository", project.repository.as_str()),
            ("branch", project.branch.as_str()),
            ("path", sub_dir_path),
        ],
    )
}

/// Renders known issues as bullets, keeping their input order
pub fn known_issues_markdown(issues: &[KnownIssue]) -> String {
    issues.iter().fold(String::new(), |mut formatted, issue| {
        writeln!(formatted, " * {} #{} ", issue.title, issue.number)
            .expect("writing to string cannot fail");
        formatted
    })
}

/// Groups pull requests by type and component, then renders them
pub fn group_and_render(
    pull_requests: &[PullRequestInformation],
    project: &Project,
) -> Result<String> {
    pull_requests_markdown(&group_prs(pull_requests), project)
}

/// Summarizes how many pull requests went in and who wrote them.
///
/// Bot accounts are not thanked. Returns an empty string for an empty release.
pub fn change_metrics_markdown(pull_requests: &[PullRequestInformation]) -> String {
    if pull_requests.is_empty() {
        return String::new();
    }

    let mut formatted = format!(
        "The release includes {} merged Pull Requests.",
        pull_requests.len()
    );

    let contributors: BTreeSet<&str> = pull_requests
        .iter()
        .filter_map(|pr| pr.author.as_ref())
        .filter(|author| !author.is_bot() && !author.login.is_empty())
        .map(|author| author.login.as_str())
        .collect();

    if !contributors.is_empty() {
        let names: Vec<&str> = contributors.into_iter().collect();
        write!(
            formatted,
            "\n\nThanks to all our contributors: @{}",
            names.join(", @")
        )
        .expect("writing to string cannot fail");
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_known_placeholders_and_escapes() {
        let out = expand_template("{{x}} {a}/{b}", &[("a", "1"), ("b", "2")])
            .expect("template should expand");
        assert_eq!(out, "{x} 1/2");
    }

    #[test]
    fn unclosed_placeholder_is_a_format_error() {
        let err = expand_template("https://host/{number", &[("number", "1")])
            .expect_err("unclosed placeholder");
        assert!(matches!(err, ReleaseNotesError::Format(_)));
    }

    #[test]
    fn stray_closing_brace_is_a_format_error() {
        let err = expand_template("a}b", &[]).expect_err("stray brace");
        assert!(matches!(err, ReleaseNotesError::Format(_)));
    }
}
