//! Create-PRs command - open every demo PR against the base branch

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::plan_view::{print_plan, print_report};
use crate::cli::style::Stylize;
use anstream::println;
use mq_cafe::demo::demo_prs;
use mq_cafe::error::Result;
use mq_cafe::runner::{create_prs_plan, execute_plan};
use std::path::Path;

/// Options for the create-prs command
#[derive(Debug, Clone, Default)]
pub struct CreatePrsOptions {
    /// Print the plan without running it
    pub dry_run: bool,
    /// Print every step as it runs
    pub verbose: bool,
}

/// Run the create-prs command
pub async fn run_create_prs(
    path: &Path,
    config: Option<&Path>,
    options: CreatePrsOptions,
) -> Result<()> {
    let ctx = CommandContext::new(path, config).await?;
    let prs = demo_prs();
    let plan = create_prs_plan(&prs, &ctx.settings);

    if options.dry_run {
        print_plan("Create-PRs plan", &plan);
        println!("{}", "Run without --dry-run to execute.".muted());
        return Ok(());
    }

    println!(
        "{} {} on {}",
        "Creating".emphasis(),
        format!("{} PRs", plan.pr_count()).accent(),
        ctx.repo_slug().accent()
    );

    let progress = if options.verbose {
        CliProgress::verbose()
    } else {
        CliProgress::compact()
    };
    let report = execute_plan(&plan, &ctx.execution(), &progress).await?;
    print_report(&report, plan.len());

    if report.is_success() {
        println!(
            "   {} {}",
            "Pull requests:".muted(),
            format!("{}/pulls", ctx.platform.config().web_url()).accent()
        );
    }
    report.into_result().map(|_| ())
}
