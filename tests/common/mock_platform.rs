//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use mq_cafe::error::{Error, Result};
use mq_cafe::platform::PlatformService;
use mq_cafe::ruleset::Ruleset;
use mq_cafe::types::{PlatformConfig, PrRequest, PullRequest, RulesetId};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `close_pr`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosePrCall {
    pub pr_number: u64,
    pub delete_branch: bool,
}

/// Simple mock platform service for testing
///
/// Manually implements `PlatformService` rather than using a mocking crate.
///
/// Features:
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Configurable open PR list
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    next_pr_number: AtomicU64,
    open_prs: Mutex<Vec<PullRequest>>,
    // Call tracking
    create_pr_calls: Mutex<Vec<PrRequest>>,
    close_pr_calls: Mutex<Vec<ClosePrCall>>,
    ruleset_calls: Mutex<Vec<Ruleset>>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
    error_on_close_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            next_pr_number: AtomicU64::new(1),
            open_prs: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            close_pr_calls: Mutex::new(Vec::new()),
            ruleset_calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
            error_on_close_pr: Mutex::new(None),
        }
    }

    // === Setup ===

    /// Set the PRs `list_open_prs` returns
    pub fn set_open_prs(&self, prs: Vec<PullRequest>) {
        *self.open_prs.lock().unwrap() = prs;
    }

    /// Make `list_open_prs` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr_with_options` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `close_pr` return an error
    pub fn fail_close_pr(&self, msg: &str) {
        *self.error_on_close_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification ===

    /// Get all `create_pr_with_options` calls
    pub fn get_create_pr_calls(&self) -> Vec<PrRequest> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Get all `close_pr` calls
    pub fn get_close_pr_calls(&self) -> Vec<ClosePrCall> {
        self.close_pr_calls.lock().unwrap().clone()
    }

    /// Get all `create_ruleset` calls
    pub fn get_ruleset_calls(&self) -> Vec<Ruleset> {
        self.ruleset_calls.lock().unwrap().clone()
    }

    /// Assert that a PR was opened from `head` into `base`
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected create_pr({head}, {base}) but got: {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }
        Ok(self.open_prs.lock().unwrap().clone())
    }

    async fn create_pr_with_options(&self, request: &PrRequest) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(request.clone());

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/test/repo/pull/{number}"),
            base_ref: request.base.clone(),
            head_ref: request.head.clone(),
            title: request.title.clone(),
            is_draft: request.draft,
        })
    }

    async fn close_pr(&self, pr_number: u64, delete_branch: bool) -> Result<()> {
        self.close_pr_calls.lock().unwrap().push(ClosePrCall {
            pr_number,
            delete_branch,
        });

        if let Some(msg) = self.error_on_close_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }
        Ok(())
    }

    async fn create_ruleset(&self, ruleset: &Ruleset) -> Result<RulesetId> {
        self.ruleset_calls.lock().unwrap().push(ruleset.clone());
        Ok(RulesetId(1))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
