//! GitHub platform service backed by the `gh` CLI
//!
//! Relies on `gh` being installed and authenticated with push (and, for
//! rulesets, admin) access to the repository.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::process::{CommandRunner, Invocation};
use crate::ruleset::Ruleset;
use crate::types::{PlatformConfig, PrRequest, PullRequest, RulesetId};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Fields requested from `gh pr list --json`
const PR_FIELDS: &str = "number,url,baseRefName,headRefName,title,isDraft";

/// Upper bound on PRs listed in one call
const LIST_LIMIT: &str = "200";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GhPullRequest {
    number: u64,
    url: String,
    base_ref_name: String,
    head_ref_name: String,
    title: String,
    #[serde(default)]
    is_draft: bool,
}

impl From<GhPullRequest> for PullRequest {
    fn from(pr: GhPullRequest) -> Self {
        Self {
            number: pr.number,
            html_url: pr.url,
            base_ref: pr.base_ref_name,
            head_ref: pr.head_ref_name,
            title: pr.title,
            is_draft: pr.is_draft,
        }
    }
}

#[derive(Deserialize)]
struct CreatedRuleset {
    id: u64,
}

/// GitHub service that shells out to `gh`
pub struct GhCliService {
    runner: Arc<dyn CommandRunner>,
    config: PlatformConfig,
}

impl GhCliService {
    /// Create a new `gh`-backed service
    pub fn new(runner: Arc<dyn CommandRunner>, config: PlatformConfig) -> Self {
        Self { runner, config }
    }

    /// Value passed to `--repo`
    fn repo_arg(&self) -> String {
        match &self.config.host {
            Some(host) => format!("{host}/{}", self.config.slug()),
            None => self.config.slug(),
        }
    }

    async fn gh(&self, args: Vec<String>) -> Result<String> {
        self.runner.run_checked(&Invocation::new("gh", args)).await
    }
}

/// Extract the PR number from the URL `gh pr create` prints
pub fn pr_number_from_url(output: &str) -> Result<(u64, String)> {
    let line = output
        .lines()
        .map(str::trim)
        .rfind(|l| l.starts_with("http"))
        .ok_or_else(|| Error::Platform(format!("no PR URL in gh output: {output}")))?;

    let url = Url::parse(line)
        .map_err(|e| Error::Platform(format!("invalid PR URL '{line}': {e}")))?;
    let number = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|last| last.parse().ok())
        .ok_or_else(|| Error::Platform(format!("no PR number in URL '{line}'")))?;

    Ok((number, line.to_string()))
}

#[async_trait]
impl PlatformService for GhCliService {
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        debug!(repo = %self.repo_arg(), "listing open PRs");
        let output = self
            .gh(vec![
                "pr".into(),
                "list".into(),
                "--repo".into(),
                self.repo_arg(),
                "--state".into(),
                "open".into(),
                "--limit".into(),
                LIST_LIMIT.into(),
                "--json".into(),
                PR_FIELDS.into(),
            ])
            .await?;

        let prs: Vec<GhPullRequest> = if output.is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&output)?
        };
        debug!(count = prs.len(), "listed open PRs");
        Ok(prs.into_iter().map(Into::into).collect())
    }

    async fn create_pr_with_options(&self, request: &PrRequest) -> Result<PullRequest> {
        debug!(head = %request.head, base = %request.base, "creating PR");
        let mut args: Vec<String> = vec![
            "pr".into(),
            "create".into(),
            "--repo".into(),
            self.repo_arg(),
            "--base".into(),
            request.base.clone(),
            "--head".into(),
            request.head.clone(),
            "--title".into(),
            request.title.clone(),
            "--body".into(),
            request.body.clone().unwrap_or_default(),
        ];
        if request.draft {
            args.push("--draft".into());
        }

        let output = self.gh(args).await?;
        let (number, html_url) = pr_number_from_url(&output)?;
        debug!(pr_number = number, "created PR");

        Ok(PullRequest {
            number,
            html_url,
            base_ref: request.base.clone(),
            head_ref: request.head.clone(),
            title: request.title.clone(),
            is_draft: request.draft,
        })
    }

    async fn close_pr(&self, pr_number: u64, delete_branch: bool) -> Result<()> {
        debug!(pr_number, delete_branch, "closing PR");
        let mut args: Vec<String> = vec![
            "pr".into(),
            "close".into(),
            pr_number.to_string(),
            "--repo".into(),
            self.repo_arg(),
        ];
        if delete_branch {
            args.push("--delete-branch".into());
        }
        self.gh(args).await?;
        debug!(pr_number, "closed PR");
        Ok(())
    }

    async fn create_ruleset(&self, ruleset: &Ruleset) -> Result<RulesetId> {
        debug!(name = %ruleset.name, "creating ruleset");
        let mut args: Vec<String> = vec![
            "api".into(),
            format!("repos/{}/rulesets", self.config.slug()),
            "-X".into(),
            "POST".into(),
            "-H".into(),
            "Accept: application/vnd.github+json".into(),
            "--input".into(),
            "-".into(),
        ];
        if let Some(host) = &self.config.host {
            args.push("--hostname".into());
            args.push(host.clone());
        }

        let payload = serde_json::to_string(ruleset)?;
        let output = self
            .runner
            .run_checked(&Invocation::new("gh", args).stdin(payload))
            .await?;

        let created: CreatedRuleset = serde_json::from_str(&output)?;
        debug!(id = created.id, "created ruleset");
        Ok(RulesetId(created.id))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
