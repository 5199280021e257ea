//! Shared setup for commands that touch git and GitHub

use mq_cafe::config::{Settings, load_settings};
use mq_cafe::error::Result;
use mq_cafe::git::GitRepo;
use mq_cafe::platform::{PlatformService, create_platform_service};
use mq_cafe::process::{CommandRunner, SystemRunner};
use mq_cafe::runner::ExecutionContext;
use std::path::Path;
use std::sync::Arc;

/// Everything a PR command needs
///
/// Settings are read from the top level of the working tree, not from
/// `path` itself, so the commands work from any subdirectory.
pub struct CommandContext {
    /// Loaded settings
    pub settings: Settings,
    /// Working tree
    pub git: GitRepo,
    /// Platform service for the configured repository
    pub platform: Box<dyn PlatformService>,
}

impl CommandContext {
    /// Discover the repository, load settings and create the platform service
    pub async fn new(path: &Path, config: Option<&Path>) -> Result<Self> {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner);
        let git = GitRepo::discover(path, Arc::clone(&runner)).await?;
        let settings = load_settings(git.root(), config)?;

        let platform_config = settings.platform_config()?;
        let platform = create_platform_service(&platform_config, settings.backend, runner).await?;

        Ok(Self {
            settings,
            git,
            platform,
        })
    }

    /// Execution context borrowing this command's repo and platform
    pub fn execution(&self) -> ExecutionContext<'_> {
        ExecutionContext {
            git: &self.git,
            platform: self.platform.as_ref(),
        }
    }

    /// `owner/repo` of the target repository
    pub fn repo_slug(&self) -> String {
        self.platform.config().slug()
    }
}
