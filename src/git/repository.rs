use crate::error::{ReleaseNotesError, Result};
use crate::git::utils::extract_pull_request_number;
use crate::log_debug;
use git2::Repository;
use std::collections::BTreeSet;
use std::env;
use std::path::{Path, PathBuf};

/// Represents a Git repository and provides methods for interacting with it.
#[derive(Debug)]
pub struct GitRepo {
    repo_path: PathBuf,
}

impl GitRepo {
    /// Creates a new `GitRepo` instance from a local path.
    ///
    /// # Arguments
    ///
    /// * `repo_path` - The path to the Git repository.
    pub fn new(repo_path: &Path) -> Self {
        Self {
            repo_path: repo_path.to_path_buf(),
        }
    }

    /// Creates a `GitRepo` for the repository enclosing the current directory
    pub fn from_current_dir() -> Result<Self> {
        let root = Self::get_repo_root()?;
        Ok(Self::new(&root))
    }

    /// Open the repository at the stored path
    pub fn open_repo(&self) -> Result<Repository> {
        Ok(Repository::open(&self.repo_path)?)
    }

    /// Returns the repository path
    pub fn repo_path(&self) -> &PathBuf {
        &self.repo_path
    }

    /// Get the root directory of the git repository enclosing the current directory
    pub fn get_repo_root() -> Result<PathBuf> {
        let current_dir = env::current_dir().map_err(|source| ReleaseNotesError::Input {
            path: PathBuf::from("."),
            source,
        })?;
        let repo = Repository::discover(&current_dir)?;
        let root = repo
            .workdir()
            .map_or_else(|| repo.path().to_path_buf(), Path::to_path_buf);
        log_debug!("Repository root: {}", root.display());
        Ok(root)
    }

    /// Collects the pull requests merged between two references.
    ///
    /// Walks every commit reachable from `to` but not from `from` and pulls the
    /// pull request number out of each commit summary.
    ///
    /// # Arguments
    ///
    /// * `from` - The reference the previous release was cut from.
    /// * `to` - The reference being released, usually `HEAD`.
    ///
    /// # Returns
    ///
    /// De-duplicated pull request numbers in ascending order.
    pub fn merged_pull_requests(&self, from: &str, to: &str) -> Result<Vec<u64>> {
        log_debug!("Scanning commits for merged pull requests: {}..{}", from, to);
        let repo = self.open_repo()?;

        let from_commit = repo.revparse_single(from)?.peel_to_commit()?;
        let to_commit = repo.revparse_single(to)?.peel_to_commit()?;

        let mut revwalk = repo.revwalk()?;
        revwalk.push(to_commit.id())?;
        revwalk.hide(from_commit.id())?;

        let mut numbers = BTreeSet::new();
        let mut scanned = 0_usize;
        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            scanned += 1;
            if let Some(number) = extract_pull_request_number(commit.message().unwrap_or_default())
            {
                numbers.insert(number);
            }
        }

        log_debug!(
            "Found {} pull requests in {} commits",
            numbers.len(),
            scanned
        );
        Ok(numbers.into_iter().collect())
    }
}
