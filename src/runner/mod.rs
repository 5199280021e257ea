//! Step runner for the demo tooling
//!
//! Three-phase pattern:
//! 1. Gather - list open PRs and branches (effectful)
//! 2. Plan - build an ordered [`Plan`] of tagged steps (pure, testable)
//! 3. Execute - run the steps one by one (effectful)
//!
//! Every step is either required or optional. A failed required step stops
//! the run; a failed optional step is recorded as a warning.

mod execute;
mod gather;
mod plan;

pub use execute::{
    ExecutionContext, ExecutionReport, SkippedPatch, StepFailure, execute_plan,
};
pub use gather::{ResetInventory, gather_reset_inventory};
pub use plan::{
    Plan, Step, StepAction, StepPolicy, create_prs_plan, create_reset_plan, create_ruleset_plan,
};

use crate::error::Error;
use crate::types::PullRequest;
use async_trait::async_trait;

/// Receives progress events while a plan runs
///
/// All methods default to doing nothing.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A step is about to run (`index` is zero-based)
    async fn on_step_start(&self, _index: usize, _total: usize, _step: &Step) {}

    /// A step finished successfully
    async fn on_step_done(&self, _step: &Step) {}

    /// An optional step failed or a patch was skipped
    async fn on_warning(&self, _step: &Step, _message: &str) {}

    /// A required step failed; the run stops after this
    async fn on_error(&self, _step: &Step, _error: &Error) {}

    /// A PR was opened
    async fn on_pr_created(&self, _pr: &PullRequest) {}
}

/// Progress callback that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {}
