use crate::config::Config;
use crate::log_debug;
use clap::Args;

#[derive(Args, Clone, Default, Debug)]
pub struct CommonParams {
    /// Repository slug on the hosting service
    #[arg(
        short = 'r',
        long = "repository",
        help = "Repository to fetch pull requests from (owner/repo)"
    )]
    pub repository: Option<String>,

    /// Project name used in headings
    #[arg(long = "project-name", help = "Project name used in headings")]
    pub project_name: Option<String>,

    /// Branch the changelog link points at
    #[arg(long, help = "Branch the changelog link points at")]
    pub branch: Option<String>,

    /// API token for the hosting service
    #[arg(long, help = "API token (defaults to the GITHUB_TOKEN environment variable)")]
    pub token: Option<String>,

    /// Base URL of the hosting service's REST API
    #[arg(long = "api-url", help = "Base URL of the REST API")]
    pub api_url: Option<String>,
}

impl CommonParams {
    /// Applies command-line overrides on top of the loaded configuration.
    ///
    /// Returns whether anything changed.
    pub fn apply_to_config(&self, config: &mut Config) -> bool {
        let mut changes_made = false;

        let overrides = [
            (&self.repository, &mut config.project.repository),
            (&self.project_name, &mut config.project.name),
            (&self.branch, &mut config.project.branch),
            (&self.api_url, &mut config.api_url),
            (&self.token, &mut config.token),
        ];

        for (value, target) in overrides {
            if let Some(value) = value
                && target.as_str() != value.as_str()
            {
                target.clone_from(value);
                changes_made = true;
            }
        }

        if changes_made {
            log_debug!("Applied command-line overrides to configuration");
        }
        changes_made
    }
}
