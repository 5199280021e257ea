//! Planning - pure functions that turn inputs into ordered steps
//!
//! No I/O happens here. Everything is passed in, so plans can be printed
//! for `--dry-run` and checked in unit tests.

use crate::config::Settings;
use crate::demo::DemoPr;
use crate::git::GitCommand;
use crate::patch::FileChange;
use crate::ruleset::Ruleset;
use crate::runner::gather::ResetInventory;
use crate::types::PrRequest;

/// Whether a failure stops the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    /// Failure aborts the remaining steps
    Required,
    /// Failure is logged and the run continues
    Optional,
}

/// What a step does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Run a git command in the working tree
    Git(GitCommand),
    /// Create or patch a file in the working tree
    ApplyChange(FileChange),
    /// Open a pull request
    CreatePr(PrRequest),
    /// Close a pull request
    ClosePr {
        /// PR number
        number: u64,
        /// Also delete the head branch
        delete_branch: bool,
    },
    /// Create a repository ruleset
    CreateRuleset(Ruleset),
}

impl std::fmt::Display for StepAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Git(command) => write!(f, "{command}"),
            Self::ApplyChange(change) => write!(f, "{change}"),
            Self::CreatePr(request) => {
                write!(f, "open PR {} -> {}: {}", request.head, request.base, request.title)
            }
            Self::ClosePr {
                number,
                delete_branch: true,
            } => write!(f, "close PR #{number} and delete its branch"),
            Self::ClosePr {
                number,
                delete_branch: false,
            } => write!(f, "close PR #{number}"),
            Self::CreateRuleset(ruleset) => write!(f, "create ruleset '{}'", ruleset.name),
        }
    }
}

/// One step of a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Human-readable description
    pub description: String,
    /// Failure policy
    pub policy: StepPolicy,
    /// The effect to perform
    pub action: StepAction,
}

impl Step {
    /// A step whose failure aborts the run
    pub fn required(action: StepAction) -> Self {
        Self {
            description: action.to_string(),
            policy: StepPolicy::Required,
            action,
        }
    }

    /// A step whose failure is only a warning
    pub fn optional(action: StepAction) -> Self {
        Self {
            description: action.to_string(),
            policy: StepPolicy::Optional,
            action,
        }
    }

    /// Override the description
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether failure aborts the run
    pub const fn is_required(&self) -> bool {
        matches!(self.policy, StepPolicy::Required)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description)
    }
}

/// Ordered list of steps
///
/// Created by the `create_*_plan` functions (pure) and run by
/// [`execute_plan`](crate::runner::execute_plan) (effectful).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Steps in execution order
    pub steps: Vec<Step>,
}

impl Plan {
    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of PRs the plan opens
    pub fn pr_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.action, StepAction::CreatePr(_)))
            .count()
    }

    fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    fn extend(&mut self, other: Self) {
        self.steps.extend(other.steps);
    }
}

fn git(command: GitCommand) -> StepAction {
    StepAction::Git(command)
}

/// Plan the creation of `prs`, one branch and PR each
///
/// Starts from an up-to-date base branch and returns to it after every PR,
/// so each branch is cut from the same base commit. File changes are
/// optional: a snippet that is missing is skipped, not fatal.
pub fn create_prs_plan(prs: &[DemoPr], settings: &Settings) -> Plan {
    let base = &settings.base_branch;
    let remote = &settings.remote;
    let mut plan = Plan::default();

    plan.push(Step::required(git(GitCommand::Checkout {
        branch: base.clone(),
    })));
    plan.push(Step::required(git(GitCommand::Pull {
        remote: remote.clone(),
        branch: base.clone(),
    })));

    for pr in prs {
        plan.push(Step::required(git(GitCommand::CreateBranch {
            name: pr.branch.clone(),
            start_point: base.clone(),
        })));
        for change in &pr.changes {
            plan.push(Step::optional(StepAction::ApplyChange(change.clone())));
        }
        plan.push(Step::required(git(GitCommand::StageAll)));
        plan.push(Step::required(git(GitCommand::Commit {
            message: pr.title.clone(),
        })));
        plan.push(Step::required(git(GitCommand::Push {
            remote: remote.clone(),
            branch: pr.branch.clone(),
            force: false,
        })));
        plan.push(Step::required(StepAction::CreatePr(PrRequest {
            head: pr.branch.clone(),
            base: base.clone(),
            title: pr.title.clone(),
            body: Some(pr.body.clone()),
            draft: false,
        })));
        plan.push(Step::required(git(GitCommand::Checkout {
            branch: base.clone(),
        })));
    }

    plan
}

/// Plan a full demo reset followed by recreating `prs`
///
/// Closes every open PR, force-resets the base branch to the configured
/// base ref, removes leftover branches, then appends [`create_prs_plan`].
pub fn create_reset_plan(inventory: &ResetInventory, prs: &[DemoPr], settings: &Settings) -> Plan {
    let base = &settings.base_branch;
    let remote = &settings.remote;
    let mut plan = Plan::default();

    for pr in &inventory.open_prs {
        plan.push(
            Step::optional(StepAction::ClosePr {
                number: pr.number,
                delete_branch: true,
            })
            .describe(format!("close PR #{} ({}) and delete its branch", pr.number, pr.head_ref)),
        );
    }

    plan.push(Step::required(git(GitCommand::Checkout {
        branch: base.clone(),
    })));
    plan.push(Step::required(git(GitCommand::Fetch {
        remote: remote.clone(),
        prune: false,
    })));
    plan.push(Step::required(git(GitCommand::ResetHard {
        target: settings.base_ref.clone(),
    })));
    plan.push(Step::required(git(GitCommand::Push {
        remote: remote.clone(),
        branch: base.clone(),
        force: true,
    })));

    // Includes PR heads, which a failed close leaves on the remote
    let keep = |branch: &str| branch == base.as_str() || branch == settings.base_ref;

    for branch in &inventory.remote_branches {
        if keep(branch) {
            continue;
        }
        plan.push(Step::optional(git(GitCommand::DeleteRemoteBranch {
            remote: remote.clone(),
            branch: branch.clone(),
        })));
    }

    for branch in &inventory.local_branches {
        if keep(branch) {
            continue;
        }
        plan.push(Step::optional(git(GitCommand::DeleteLocalBranch {
            branch: branch.clone(),
        })));
    }

    plan.extend(create_prs_plan(prs, settings));
    plan
}

/// Plan the creation of a single ruleset
pub fn create_ruleset_plan(ruleset: Ruleset) -> Plan {
    Plan {
        steps: vec![Step::required(StepAction::CreateRuleset(ruleset))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PullRequest;

    fn make_pr(branch: &str, changes: Vec<FileChange>) -> DemoPr {
        DemoPr {
            branch: branch.to_string(),
            title: format!("Title for {branch}"),
            body: String::new(),
            changes,
        }
    }

    fn open_pr(number: u64, head: &str) -> PullRequest {
        PullRequest {
            number,
            html_url: format!("https://github.com/acme/cafe/pull/{number}"),
            base_ref: "main".to_string(),
            head_ref: head.to_string(),
            title: head.to_string(),
            is_draft: false,
        }
    }

    #[test]
    fn test_create_prs_plan_order() {
        let prs = vec![make_pr(
            "add-latte",
            vec![FileChange::patch("data/menu.toml", "# slot:latte", "latte")],
        )];
        let plan = create_prs_plan(&prs, &Settings::default());

        let descriptions: Vec<&str> = plan.steps.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "git checkout main",
                "git pull origin main",
                "git checkout -b add-latte main",
                "patch data/menu.toml",
                "git add -A",
                r#"git commit -m "Title for add-latte""#,
                "git push origin add-latte",
                "open PR add-latte -> main: Title for add-latte",
                "git checkout main",
            ]
        );
        assert_eq!(plan.pr_count(), 1);
    }

    #[test]
    fn test_only_file_changes_are_optional() {
        let prs = vec![
            make_pr("a", vec![FileChange::create("a.txt", "a")]),
            make_pr("b", vec![FileChange::create("b.txt", "b")]),
        ];
        let plan = create_prs_plan(&prs, &Settings::default());

        for step in &plan.steps {
            let is_change = matches!(step.action, StepAction::ApplyChange(_));
            assert_eq!(step.is_required(), !is_change, "{step}");
        }
    }

    #[test]
    fn test_reset_plan_closes_then_resets() {
        let inventory = ResetInventory {
            open_prs: vec![open_pr(7, "add-latte")],
            remote_branches: vec![
                "main".to_string(),
                "add-latte".to_string(),
                "stale".to_string(),
            ],
            local_branches: vec!["main".to_string(), "add-latte".to_string()],
        };
        let plan = create_reset_plan(&inventory, &[], &Settings::default());

        assert_eq!(
            plan.steps[0].action,
            StepAction::ClosePr {
                number: 7,
                delete_branch: true
            }
        );
        assert!(!plan.steps[0].is_required());

        let reset_pos = plan
            .steps
            .iter()
            .position(|s| {
                s.action
                    == StepAction::Git(GitCommand::ResetHard {
                        target: "demo-base".to_string(),
                    })
            })
            .unwrap();
        assert!(plan.steps[reset_pos].is_required());
        assert_eq!(
            plan.steps[reset_pos + 1].action,
            StepAction::Git(GitCommand::Push {
                remote: "origin".to_string(),
                branch: "main".to_string(),
                force: true,
            })
        );
    }

    #[test]
    fn test_reset_plan_branch_cleanup() {
        let inventory = ResetInventory {
            open_prs: vec![open_pr(7, "add-latte")],
            remote_branches: vec![
                "main".to_string(),
                "demo-base".to_string(),
                "add-latte".to_string(),
                "stale".to_string(),
            ],
            local_branches: vec!["main".to_string(), "add-latte".to_string()],
        };
        let plan = create_reset_plan(&inventory, &[], &Settings::default());

        let remote_deletes: Vec<&str> = plan
            .steps
            .iter()
            .filter_map(|s| match &s.action {
                StepAction::Git(GitCommand::DeleteRemoteBranch { branch, .. }) => {
                    Some(branch.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(remote_deletes, vec!["add-latte", "stale"]);
        assert!(plan.steps.iter().all(|s| match &s.action {
            StepAction::Git(GitCommand::DeleteRemoteBranch { .. }) => !s.is_required(),
            _ => true,
        }));

        let local_deletes: Vec<&str> = plan
            .steps
            .iter()
            .filter_map(|s| match &s.action {
                StepAction::Git(GitCommand::DeleteLocalBranch { branch }) => Some(branch.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(local_deletes, vec!["add-latte"]);
    }

    #[test]
    fn test_reset_plan_appends_create_plan() {
        let prs = vec![make_pr("add-latte", vec![])];
        let settings = Settings::default();
        let plan = create_reset_plan(&ResetInventory::default(), &prs, &settings);
        let create = create_prs_plan(&prs, &settings);

        assert!(plan.steps.ends_with(&create.steps));
        assert_eq!(plan.len(), 4 + create.len());
    }

    #[test]
    fn test_ruleset_plan() {
        let plan = create_ruleset_plan(Ruleset::merge_queue("main", "test"));
        assert_eq!(plan.len(), 1);
        assert!(plan.steps[0].is_required());
        assert_eq!(plan.steps[0].description, "create ruleset 'Merge Queue'");
    }
}
