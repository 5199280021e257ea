//! Plan execution - effectful operations
//!
//! Takes a [`Plan`] and runs its steps strictly in order against the
//! working tree and the platform.

use crate::error::{Error, Result};
use crate::git::GitRepo;
use crate::patch::{PatchOutcome, apply_change};
use crate::platform::PlatformService;
use crate::runner::ProgressCallback;
use crate::runner::plan::{Plan, Step, StepAction, StepPolicy};
use crate::types::PullRequest;
use tracing::{debug, warn};

/// Where steps run
#[derive(Clone, Copy)]
pub struct ExecutionContext<'a> {
    /// Working tree for git steps and file changes
    pub git: &'a GitRepo,
    /// Platform for PR and ruleset steps
    pub platform: &'a dyn PlatformService,
}

/// A step that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// Description of the step
    pub step: String,
    /// Error message
    pub message: String,
}

/// A file change that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPatch {
    /// File the change targeted
    pub path: String,
    /// Why it was skipped
    pub reason: String,
}

/// Result of plan execution
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    /// Steps that ran successfully (skipped patches included)
    pub completed: usize,
    /// Optional steps that failed
    pub warnings: Vec<StepFailure>,
    /// File changes whose target was missing
    pub skipped_patches: Vec<SkippedPatch>,
    /// PRs opened during the run
    pub created_prs: Vec<PullRequest>,
    /// The required step that stopped the run, if any
    pub aborted: Option<StepFailure>,
}

impl ExecutionReport {
    /// Whether every required step succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.aborted.is_none()
    }

    /// Whether anything needs the user's attention
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty() || !self.skipped_patches.is_empty()
    }

    /// Turn an aborted run into [`Error::StepFailed`]
    pub fn into_result(self) -> Result<Self> {
        match self.aborted {
            Some(failure) => Err(Error::StepFailed {
                step: failure.step,
                message: failure.message,
            }),
            None => Ok(self),
        }
    }
}

enum StepOutcome {
    Done,
    Skipped(String),
    PrCreated(PullRequest),
}

async fn run_step(step: &Step, ctx: &ExecutionContext<'_>) -> Result<StepOutcome> {
    match &step.action {
        StepAction::Git(command) => {
            ctx.git.run(command).await?;
            Ok(StepOutcome::Done)
        }
        StepAction::ApplyChange(change) => match apply_change(ctx.git.root(), change)? {
            PatchOutcome::Skipped { reason } => Ok(StepOutcome::Skipped(reason)),
            PatchOutcome::Created | PatchOutcome::Patched => Ok(StepOutcome::Done),
        },
        StepAction::CreatePr(request) => {
            let pr = ctx.platform.create_pr_with_options(request).await?;
            Ok(StepOutcome::PrCreated(pr))
        }
        StepAction::ClosePr {
            number,
            delete_branch,
        } => {
            ctx.platform.close_pr(*number, *delete_branch).await?;
            Ok(StepOutcome::Done)
        }
        StepAction::CreateRuleset(ruleset) => {
            let id = ctx.platform.create_ruleset(ruleset).await?;
            debug!(%id, "ruleset created");
            Ok(StepOutcome::Done)
        }
    }
}

/// Execute the plan (EFFECTFUL)
///
/// Steps run one at a time in plan order. The first failed required step
/// ends the run and is recorded in [`ExecutionReport::aborted`]; optional
/// failures and skipped patches are recorded and execution continues.
///
/// Only errors from the runner itself are returned as `Err`; step failures
/// are reported in the returned report.
pub async fn execute_plan(
    plan: &Plan,
    ctx: &ExecutionContext<'_>,
    progress: &dyn ProgressCallback,
) -> Result<ExecutionReport> {
    let mut report = ExecutionReport::default();
    let total = plan.len();

    for (index, step) in plan.steps.iter().enumerate() {
        progress.on_step_start(index, total, step).await;
        debug!(index, step = %step, "running step");

        match run_step(step, ctx).await {
            Ok(StepOutcome::Done) => {
                report.completed += 1;
                progress.on_step_done(step).await;
            }
            Ok(StepOutcome::Skipped(reason)) => {
                report.completed += 1;
                if let StepAction::ApplyChange(change) = &step.action {
                    report.skipped_patches.push(SkippedPatch {
                        path: change.path.clone(),
                        reason: reason.clone(),
                    });
                }
                progress.on_warning(step, &reason).await;
            }
            Ok(StepOutcome::PrCreated(pr)) => {
                report.completed += 1;
                progress.on_pr_created(&pr).await;
                report.created_prs.push(pr);
            }
            Err(e) => match step.policy {
                StepPolicy::Optional => {
                    warn!(step = %step, error = %e, "optional step failed, continuing");
                    let message = e.to_string();
                    progress.on_warning(step, &message).await;
                    report.warnings.push(StepFailure {
                        step: step.description.clone(),
                        message,
                    });
                }
                StepPolicy::Required => {
                    progress.on_error(step, &e).await;
                    report.aborted = Some(StepFailure {
                        step: step.description.clone(),
                        message: e.to_string(),
                    });
                    break;
                }
            },
        }
    }

    Ok(report)
}
