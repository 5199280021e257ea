//! CLI commands

mod auth;
mod check;
mod context;
mod create_prs;
mod menu;
mod plan_view;
mod reset;
mod ruleset;
mod serve;
pub mod style;

pub use auth::run_auth;
pub use check::run_check;
pub use create_prs::{CreatePrsOptions, run_create_prs};
pub use menu::run_menu;
pub use reset::{ResetOptions, run_reset};
pub use ruleset::{RulesetOptions, run_ruleset};
pub use serve::run_serve;

use anstream::println;
use async_trait::async_trait;
use mq_cafe::error::Error;
use mq_cafe::runner::{ProgressCallback, Step};
use mq_cafe::types::PullRequest;
use style::{Stylize, arrow, check, cross, link};

/// Prints plan progress to the terminal
pub struct CliProgress {
    /// Print every step, not just warnings, failures and new PRs
    verbose: bool,
}

impl CliProgress {
    /// Only print what needs attention and the PRs opened
    pub const fn compact() -> Self {
        Self { verbose: false }
    }

    /// Print every step as it starts
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_step_start(&self, index: usize, total: usize, step: &Step) {
        if self.verbose {
            println!(
                "  {} {} {}",
                format!("[{}/{total}]", index + 1).muted(),
                arrow(),
                step
            );
        }
    }

    async fn on_warning(&self, step: &Step, message: &str) {
        println!("  {} {}", "⚠".warn(), step.description.warn());
        println!("      {}", message.muted());
    }

    async fn on_error(&self, step: &Step, error: &Error) {
        println!("  {} {}", cross(), step.description.error());
        println!("      {}", error.muted());
    }

    async fn on_pr_created(&self, pr: &PullRequest) {
        println!(
            "  {} {} {}",
            check(),
            link(&format!("#{}", pr.number), &pr.html_url).accent(),
            pr.title
        );
    }
}
