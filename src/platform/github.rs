//! GitHub platform service implementation using the REST API

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::ruleset::Ruleset;
use crate::types::{PlatformConfig, PrRequest, PullRequest, RulesetId};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// GitHub service using octocrab
///
/// Listing and creating PRs go through octocrab; closing PRs, deleting refs
/// and posting rulesets use raw requests.
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API base URL for raw requests, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service for github.com or an Enterprise host
    pub fn new(token: &str, config: PlatformConfig) -> Result<Self> {
        let api_base = config.host.as_ref().map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_base_url(token, config, &api_base)
    }

    /// Create a service talking to an explicit API base URL
    pub fn with_base_url(token: &str, config: PlatformConfig, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("mq-cafe")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{path}",
            self.api_base, self.config.owner, self.config.repo
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// Send a request and fail on non-success status
    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<reqwest::Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to {what}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to {what}: {status} {}",
                body.trim()
            )));
        }
        Ok(response)
    }

    async fn delete_branch(&self, branch: &str) -> Result<()> {
        debug!(branch, "deleting branch");
        let url = self.repo_url(&format!("git/refs/heads/{}", urlencoding::encode(branch)));
        self.send(self.request(Method::DELETE, &url), "delete branch")
            .await?;
        debug!(branch, "deleted branch");
        Ok(())
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        is_draft: pr.draft.unwrap_or(false),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        debug!("listing open PRs");
        let prs = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(octocrab::params::State::Open)
            .per_page(100u8)
            .send()
            .await?;

        let result: Vec<PullRequest> = prs.items.iter().map(pr_from_octocrab).collect();
        debug!(count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn create_pr_with_options(&self, request: &PrRequest) -> Result<PullRequest> {
        debug!(head = %request.head, base = %request.base, draft = request.draft, "creating PR");
        let pulls = self.client.pulls(&self.config.owner, &self.config.repo);
        let mut builder = pulls
            .create(&request.title, &request.head, &request.base)
            .draft(request.draft);

        if let Some(body_text) = &request.body {
            builder = builder.body(body_text);
        }

        let pr = builder.send().await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number = result.number, "created PR");
        Ok(result)
    }

    async fn close_pr(&self, pr_number: u64, delete_branch: bool) -> Result<()> {
        #[derive(Deserialize)]
        struct ClosedPr {
            head: HeadRef,
        }

        #[derive(Deserialize)]
        struct HeadRef {
            #[serde(rename = "ref")]
            ref_field: String,
        }

        debug!(pr_number, delete_branch, "closing PR");
        let url = self.repo_url(&format!("pulls/{pr_number}"));
        let response = self
            .send(
                self.request(Method::PATCH, &url)
                    .json(&json!({ "state": "closed" })),
                "close PR",
            )
            .await?;

        let closed: ClosedPr = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse closed PR: {e}")))?;
        debug!(pr_number, "closed PR");

        if delete_branch {
            self.delete_branch(&closed.head.ref_field).await?;
        }
        Ok(())
    }

    async fn create_ruleset(&self, ruleset: &Ruleset) -> Result<RulesetId> {
        #[derive(Deserialize)]
        struct CreatedRuleset {
            id: u64,
        }

        debug!(name = %ruleset.name, "creating ruleset");
        let url = self.repo_url("rulesets");
        let response = self
            .send(
                self.request(Method::POST, &url).json(ruleset),
                "create ruleset",
            )
            .await?;

        let created: CreatedRuleset = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse ruleset: {e}")))?;
        debug!(id = created.id, "created ruleset");
        Ok(RulesetId(created.id))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
