//! Local git operations
//!
//! Thin wrapper over the `git` binary. Commands are plain data
//! ([`GitCommand`]) so plans can be printed and tested before anything runs.

use crate::error::Result;
use crate::process::{CommandRunner, Invocation};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A git command the demo tooling issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCommand {
    /// Switch to an existing branch
    Checkout {
        /// Branch name
        branch: String,
    },
    /// Create and switch to a new branch
    CreateBranch {
        /// New branch name
        name: String,
        /// Commit-ish to branch from
        start_point: String,
    },
    /// Fetch from a remote
    Fetch {
        /// Remote name
        remote: String,
        /// Drop remote-tracking refs that no longer exist
        prune: bool,
    },
    /// Pull a branch from a remote
    Pull {
        /// Remote name
        remote: String,
        /// Branch name
        branch: String,
    },
    /// Stage every change in the working tree
    StageAll,
    /// Commit staged changes
    Commit {
        /// Commit message
        message: String,
    },
    /// Push a branch
    Push {
        /// Remote name
        remote: String,
        /// Branch name
        branch: String,
        /// Overwrite the remote branch
        force: bool,
    },
    /// Delete a branch on a remote
    DeleteRemoteBranch {
        /// Remote name
        remote: String,
        /// Branch name
        branch: String,
    },
    /// Force-delete a local branch
    DeleteLocalBranch {
        /// Branch name
        branch: String,
    },
    /// Reset the current branch and working tree
    ResetHard {
        /// Commit-ish to reset to
        target: String,
    },
}

impl GitCommand {
    /// Arguments passed to `git`
    pub fn args(&self) -> Vec<String> {
        let parts: Vec<&str> = match self {
            Self::Checkout { branch } => vec!["checkout", branch.as_str()],
            Self::CreateBranch { name, start_point } => {
                vec!["checkout", "-b", name.as_str(), start_point.as_str()]
            }
            Self::Fetch { remote, prune: true } => vec!["fetch", "--prune", remote.as_str()],
            Self::Fetch { remote, prune: false } => vec!["fetch", remote.as_str()],
            Self::Pull { remote, branch } => vec!["pull", remote.as_str(), branch.as_str()],
            Self::StageAll => vec!["add", "-A"],
            Self::Commit { message } => vec!["commit", "-m", message.as_str()],
            Self::Push {
                remote,
                branch,
                force: true,
            } => vec!["push", "--force", remote.as_str(), branch.as_str()],
            Self::Push {
                remote,
                branch,
                force: false,
            } => vec!["push", remote.as_str(), branch.as_str()],
            Self::DeleteRemoteBranch { remote, branch } => {
                vec!["push", remote.as_str(), "--delete", branch.as_str()]
            }
            Self::DeleteLocalBranch { branch } => vec!["branch", "-D", branch.as_str()],
            Self::ResetHard { target } => vec!["reset", "--hard", target.as_str()],
        };
        parts.into_iter().map(String::from).collect()
    }
}

impl std::fmt::Display for GitCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Invocation::new("git", self.args()))
    }
}

/// A git working tree
#[derive(Clone)]
pub struct GitRepo {
    root: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl GitRepo {
    /// Wrap the working tree at `root`
    pub fn new(root: impl Into<PathBuf>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            root: root.into(),
            runner,
        }
    }

    /// Find the top level of the working tree containing `path`
    pub async fn discover(path: &Path, runner: Arc<dyn CommandRunner>) -> Result<Self> {
        let invocation =
            Invocation::new("git", ["rev-parse", "--show-toplevel"]).current_dir(path);
        let root = runner.run_checked(&invocation).await?;
        debug!(root = %root, "discovered git repository");
        Ok(Self::new(root, runner))
    }

    /// Root of the working tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a git command, failing on non-zero exit
    pub async fn run(&self, command: &GitCommand) -> Result<String> {
        self.run_args(command.args()).await
    }

    async fn run_args(&self, args: Vec<String>) -> Result<String> {
        let invocation = Invocation::new("git", args).current_dir(&self.root);
        self.runner.run_checked(&invocation).await
    }

    /// Remote-tracking branches of `remote`, without the remote prefix
    pub async fn list_remote_branches(&self, remote: &str) -> Result<Vec<String>> {
        let output = self
            .run_args(vec![
                "branch".into(),
                "-r".into(),
                "--list".into(),
                format!("{remote}/*"),
                "--no-color".into(),
                "--format=%(refname:short)".into(),
            ])
            .await?;
        Ok(parse_remote_branches(&output, remote))
    }

    /// Local branch names
    pub async fn list_local_branches(&self) -> Result<Vec<String>> {
        let output = self
            .run_args(vec![
                "branch".into(),
                "--no-color".into(),
                "--format=%(refname:short)".into(),
            ])
            .await?;
        Ok(parse_local_branches(&output))
    }
}

/// Parse `git branch -r --format=%(refname:short)` output
///
/// Strips the `remote/` prefix and drops the symbolic `HEAD` ref.
pub fn parse_remote_branches(output: &str, remote: &str) -> Vec<String> {
    let prefix = format!("{remote}/");
    output
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(&prefix))
        .filter(|name| !name.is_empty() && *name != "HEAD" && !name.starts_with("HEAD "))
        .map(String::from)
        .collect()
}

/// Parse `git branch` output, tolerating the `* ` current-branch marker
pub fn parse_local_branches(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim().trim_start_matches("* ").trim())
        .filter(|name| !name.is_empty() && !name.starts_with('('))
        .map(String::from)
        .collect()
}
