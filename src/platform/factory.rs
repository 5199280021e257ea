//! Platform service factory

use crate::auth::get_github_auth;
use crate::error::Result;
use crate::platform::{GhCliService, GitHubService, PlatformService};
use crate::process::CommandRunner;
use crate::types::{Backend, PlatformConfig};
use std::sync::Arc;
use tracing::debug;

/// Create the platform service for the configured backend
pub async fn create_platform_service(
    config: &PlatformConfig,
    backend: Backend,
    runner: Arc<dyn CommandRunner>,
) -> Result<Box<dyn PlatformService>> {
    debug!(repo = %config.slug(), %backend, "creating platform service");
    match backend {
        Backend::Cli => Ok(Box::new(GhCliService::new(runner, config.clone()))),
        Backend::Api => {
            let auth = get_github_auth(runner.as_ref(), config.host.as_deref()).await?;
            Ok(Box::new(GitHubService::new(&auth.token, config.clone())?))
        }
    }
}
