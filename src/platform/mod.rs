//! Platform services for GitHub
//!
//! Provides one interface for the pull request operations the demo needs,
//! backed either by the `gh` CLI or by the REST API.

mod detection;
mod factory;
mod gh_cli;
mod github;

pub use detection::parse_repo_slug;
pub use factory::create_platform_service;
pub use gh_cli::GhCliService;
pub use github::GitHubService;

use crate::error::Result;
use crate::ruleset::Ruleset;
use crate::types::{PlatformConfig, PrRequest, PullRequest, RulesetId};
use async_trait::async_trait;

/// Platform service trait for PR operations
///
/// This trait abstracts over the `gh` CLI and the REST API so the same
/// demo plans run against either backend.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List all open PRs in the repository
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>>;

    /// Create a new PR with explicit body and draft options
    async fn create_pr_with_options(&self, request: &PrRequest) -> Result<PullRequest>;

    /// Close a PR, optionally deleting its head branch
    async fn close_pr(&self, pr_number: u64, delete_branch: bool) -> Result<()>;

    /// Create a repository ruleset
    async fn create_ruleset(&self, ruleset: &Ruleset) -> Result<RulesetId>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
