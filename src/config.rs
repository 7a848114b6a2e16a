use crate::git::GitRepo;
use crate::log_debug;
use crate::types::Project;

use anyhow::{Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration structure for the release-notes tool
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Project the notes are generated for
    #[serde(default)]
    pub project: Project,
    /// Directory release artifacts are written under, relative to the working directory
    #[serde(default = "default_changelog_dir")]
    pub changelog_dir: String,
    /// Base URL of the hosting service's REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// API token; falls back to `GITHUB_TOKEN` when empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
    /// Whether to include HTTP client logs in the log file
    #[serde(default)]
    pub verbose_logging: bool,
}

fn default_changelog_dir() -> String {
    "changelog".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Project configuration filename
pub const PROJECT_CONFIG_FILENAME: &str = ".release-notes.toml";

/// Environment variable consulted when no token is configured
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

impl Config {
    /// Load the configuration from the file
    pub fn load() -> Result<Self> {
        // First load personal config
        let config_path = Self::get_config_path()?;
        let mut config = if config_path.exists() {
            let config_content = fs::read_to_string(&config_path)?;
            Self::from_toml_str(&config_content)?
        } else {
            Self::default()
        };

        // Then merge the project config; outside a repository there is none
        if let Ok(repo_root) = GitRepo::get_repo_root()
            && let Some(project_config) = Self::load_project_config(&repo_root)?
        {
            config.merge_with_project_config(project_config);
        }

        log_debug!("Configuration loaded: {:?}", config.redacted());
        Ok(config)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| anyhow!("Invalid configuration: {}", e))
    }

    /// Load the project configuration committed at `repo_root`.
    ///
    /// A missing file is `None`; an unreadable or malformed one is an error.
    pub fn load_project_config(repo_root: &Path) -> Result<Option<Self>> {
        let config_path = repo_root.join(PROJECT_CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(None);
        }

        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| anyhow!("Failed to read project config file: {}", e))?;

        let config = toml::from_str(&config_str).map_err(|e| {
            anyhow!(
                "Invalid project configuration file format: {}. Please check your {} file for syntax errors.",
                e,
                PROJECT_CONFIG_FILENAME
            )
        })?;

        log_debug!("Loaded project configuration from {}", config_path.display());
        Ok(Some(config))
    }

    /// Merge this config with project-specific config, with project config taking precedence
    /// But never allow tokens from project config
    pub fn merge_with_project_config(&mut self, project_config: Self) {
        log_debug!("Merging with project configuration");
        let defaults = Self::default();

        let Self {
            project,
            changelog_dir,
            api_url,
            verbose_logging,
            ..
        } = project_config;

        if project.name != defaults.project.name {
            self.project.name = project.name;
        }
        if project.repository != defaults.project.repository {
            self.project.repository = project.repository;
        }
        if project.branch != defaults.project.branch {
            self.project.branch = project.branch;
        }
        if project.pull_request_url != defaults.project.pull_request_url {
            self.project.pull_request_url = project.pull_request_url;
        }
        if project.changelog_url != defaults.project.changelog_url {
            self.project.changelog_url = project.changelog_url;
        }
        if changelog_dir != defaults.changelog_dir {
            self.changelog_dir = changelog_dir;
        }
        if api_url != defaults.api_url {
            self.api_url = api_url;
        }
        self.verbose_logging |= verbose_logging;
    }

    /// Token to authenticate with, preferring the configured one
    pub fn effective_token(&self) -> Option<String> {
        if self.token.is_empty() {
            env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty())
        } else {
            Some(self.token.clone())
        }
    }

    /// Copy safe to log
    fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.token.is_empty() {
            copy.token = "***".to_string();
        }
        copy
    }

    /// Get the path to the configuration file
    fn get_config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("release-notes");
        path.push("config.toml");
        Ok(path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: Project::default(),
            changelog_dir: default_changelog_dir(),
            api_url: default_api_url(),
            token: String::new(),
            verbose_logging: false,
        }
    }
}
