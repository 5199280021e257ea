//! Ruleset command - create the merge-queue branch ruleset

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::plan_view::print_report;
use crate::cli::style::Stylize;
use anstream::println;
use mq_cafe::error::Result;
use mq_cafe::ruleset::Ruleset;
use mq_cafe::runner::{create_ruleset_plan, execute_plan};
use std::path::Path;

/// Options for the ruleset command
#[derive(Debug, Clone, Default)]
pub struct RulesetOptions {
    /// Print the request body without sending it
    pub dry_run: bool,
}

/// Run the ruleset command
pub async fn run_ruleset(path: &Path, config: Option<&Path>, options: RulesetOptions) -> Result<()> {
    let ctx = CommandContext::new(path, config).await?;
    let ruleset = Ruleset::merge_queue(&ctx.settings.base_branch, &ctx.settings.required_check);

    if options.dry_run {
        println!(
            "{} POST repos/{}/rulesets",
            "Would send:".emphasis(),
            ctx.repo_slug()
        );
        println!("{}", serde_json::to_string_pretty(&ruleset)?);
        return Ok(());
    }

    println!(
        "{} '{}' on {}",
        "Creating ruleset".emphasis(),
        ruleset.name.accent(),
        ctx.repo_slug().accent()
    );

    let plan = create_ruleset_plan(ruleset);
    let report = execute_plan(&plan, &ctx.execution(), &CliProgress::verbose()).await?;
    print_report(&report, plan.len());
    report.into_result().map(|_| ())
}
