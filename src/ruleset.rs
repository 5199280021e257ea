//! Branch ruleset enabling the merge queue
//!
//! Rulesets are not copied when a repository is forked, so a fresh fork needs
//! this one recreated before the demo can run.

use serde::{Deserialize, Serialize};

/// Repository role id GitHub uses for admins
const ADMIN_ROLE_ID: u64 = 5;

/// A repository ruleset, shaped like the REST `rulesets` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    /// Ruleset name
    pub name: String,
    /// What the ruleset targets (`branch`)
    pub target: String,
    /// `active`, `evaluate` or `disabled`
    pub enforcement: String,
    /// Actors allowed to bypass
    pub bypass_actors: Vec<BypassActor>,
    /// Which refs the rules apply to
    pub conditions: Conditions,
    /// The rules
    pub rules: Vec<Rule>,
}

/// An actor allowed to bypass the ruleset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BypassActor {
    /// Actor id
    pub actor_id: u64,
    /// Actor type, e.g. `RepositoryRole`
    pub actor_type: String,
    /// `always` or `pull_request`
    pub bypass_mode: String,
}

/// Ref conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    /// Ref name patterns
    pub ref_name: RefNameCondition,
}

/// Include/exclude ref patterns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefNameCondition {
    /// Included refs
    pub include: Vec<String>,
    /// Excluded refs
    pub exclude: Vec<String>,
}

/// A single rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parameters", rename_all = "snake_case")]
pub enum Rule {
    /// Route merges through the merge queue
    MergeQueue(MergeQueueParameters),
    /// Require status checks to pass
    RequiredStatusChecks(StatusCheckParameters),
}

/// Merge queue tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeQueueParameters {
    /// Minutes to wait for checks before failing an entry
    pub check_response_timeout_minutes: u32,
    /// `ALLGREEN` or `HEADGREEN`
    pub grouping_strategy: String,
    /// Entries built concurrently
    pub max_entries_to_build: u32,
    /// Entries merged together (0 = unlimited)
    pub max_entries_to_merge: u32,
    /// `MERGE`, `SQUASH` or `REBASE`
    pub merge_method: String,
    /// Minimum entries merged together
    pub min_entries_to_merge: u32,
    /// Minutes to wait for `min_entries_to_merge`
    pub min_entries_to_merge_wait_minutes: u32,
}

/// Required status check settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheckParameters {
    /// Require branches to be up to date
    pub strict_required_status_checks_policy: bool,
    /// Checks that must pass
    pub required_status_checks: Vec<StatusCheck>,
}

/// One required check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    /// Check context name
    pub context: String,
}

impl Ruleset {
    /// The "Merge Queue" ruleset used by the demo
    pub fn merge_queue(base_branch: &str, required_check: &str) -> Self {
        Self {
            name: "Merge Queue".to_string(),
            target: "branch".to_string(),
            enforcement: "active".to_string(),
            bypass_actors: vec![BypassActor {
                actor_id: ADMIN_ROLE_ID,
                actor_type: "RepositoryRole".to_string(),
                bypass_mode: "always".to_string(),
            }],
            conditions: Conditions {
                ref_name: RefNameCondition {
                    include: vec![format!("refs/heads/{base_branch}")],
                    exclude: vec![],
                },
            },
            rules: vec![
                Rule::MergeQueue(MergeQueueParameters {
                    check_response_timeout_minutes: 60,
                    grouping_strategy: "ALLGREEN".to_string(),
                    max_entries_to_build: 5,
                    max_entries_to_merge: 0,
                    merge_method: "MERGE".to_string(),
                    min_entries_to_merge: 1,
                    min_entries_to_merge_wait_minutes: 5,
                }),
                Rule::RequiredStatusChecks(StatusCheckParameters {
                    strict_required_status_checks_policy: false,
                    required_status_checks: vec![StatusCheck {
                        context: required_check.to_string(),
                    }],
                }),
            ],
        }
    }
}
