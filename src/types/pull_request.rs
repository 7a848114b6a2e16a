use serde::{Deserialize, Serialize};

/// Label attached to a pull request, e.g. `Type: Bug` or `Component: VTGate`
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct Label {
    pub name: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the remainder of the label name when it starts with `prefix`
    pub fn strip_prefix<'a>(&'a self, prefix: &str) -> Option<&'a str> {
        self.name.strip_prefix(prefix)
    }
}

/// Account that opened a pull request
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct Author {
    pub login: String,
}

impl Author {
    /// Bot accounts are left out of the contributor list
    pub fn is_bot(&self) -> bool {
        self.login.ends_with("[bot]") || self.login.starts_with("app/")
    }
}

/// Metadata of a single merged pull request
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct PullRequestInformation {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

impl PullRequestInformation {
    pub fn new(number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            labels: Vec::new(),
            author: None,
        }
    }

    /// Builder-style helper to attach labels
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Label::new));
        self
    }

    /// Builder-style helper to attach an author login
    pub fn with_author(mut self, login: impl Into<String>) -> Self {
        self.author = Some(Author {
            login: login.into(),
        });
        self
    }
}

/// An open defect documented alongside a release
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct KnownIssue {
    pub number: u64,
    pub title: String,
}

impl KnownIssue {
    pub fn new(number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
        }
    }
}
