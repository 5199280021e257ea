//! Core types for mq-cafe

use serde::{Deserialize, Serialize};

/// A pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
    /// Whether PR is a draft
    pub is_draft: bool,
}

/// Everything needed to open a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrRequest {
    /// Head branch
    pub head: String,
    /// Base branch
    pub base: String,
    /// Title
    pub title: String,
    /// Markdown body
    pub body: Option<String>,
    /// Open as draft
    pub draft: bool,
}

/// How PR operations reach GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Shell out to the authenticated `gh` CLI
    #[default]
    Cli,
    /// Call the REST API directly with a token
    Api,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "cli"),
            Self::Api => write!(f, "api"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cli" | "gh" => Ok(Self::Cli),
            "api" | "rest" => Ok(Self::Api),
            other => Err(crate::error::Error::Config(format!(
                "unknown backend '{other}' (expected 'cli' or 'api')"
            ))),
        }
    }
}

/// Platform configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

impl PlatformConfig {
    /// `owner/repo` slug
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Web URL of the repository
    pub fn web_url(&self) -> String {
        let host = self.host.as_deref().unwrap_or("github.com");
        format!("https://{host}/{}/{}", self.owner, self.repo)
    }
}

/// Identifier of a created ruleset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetId(pub u64);

impl std::fmt::Display for RulesetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
