//! Gather phase for a demo reset

use crate::config::Settings;
use crate::error::Result;
use crate::git::{GitCommand, GitRepo};
use crate::platform::PlatformService;
use crate::types::PullRequest;
use tracing::debug;

/// State of the repository before a reset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetInventory {
    /// PRs currently open
    pub open_prs: Vec<PullRequest>,
    /// Branches on the remote, without the remote prefix
    pub remote_branches: Vec<String>,
    /// Local branches
    pub local_branches: Vec<String>,
}

/// Collect open PRs and branch lists (EFFECTFUL)
///
/// Runs `git fetch --prune` first so the remote branch list is current.
pub async fn gather_reset_inventory(
    git: &GitRepo,
    platform: &dyn PlatformService,
    settings: &Settings,
) -> Result<ResetInventory> {
    let open_prs = platform.list_open_prs().await?;

    git.run(&GitCommand::Fetch {
        remote: settings.remote.clone(),
        prune: true,
    })
    .await?;

    let remote_branches = git.list_remote_branches(&settings.remote).await?;
    let local_branches = git.list_local_branches().await?;

    debug!(
        open_prs = open_prs.len(),
        remote_branches = remote_branches.len(),
        local_branches = local_branches.len(),
        "gathered reset inventory"
    );

    Ok(ResetInventory {
        open_prs,
        remote_branches,
        local_branches,
    })
}
