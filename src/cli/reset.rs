//! Reset command - close demo PRs, reset the base branch, recreate PRs

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::plan_view::{print_plan, print_report};
use crate::cli::style::{Stylize, check, spinner_style};
use anstream::println;
use dialoguer::Confirm;
use indicatif::ProgressBar;
use mq_cafe::demo::demo_prs;
use mq_cafe::error::{Error, Result};
use mq_cafe::runner::{create_reset_plan, execute_plan, gather_reset_inventory};
use std::path::Path;
use std::time::Duration;

/// Options for the reset command
#[derive(Debug, Clone, Default)]
pub struct ResetOptions {
    /// Print the plan without running it
    pub dry_run: bool,
    /// Skip the confirmation prompt
    pub yes: bool,
    /// Print every step as it runs
    pub verbose: bool,
}

/// Run the reset command
pub async fn run_reset(path: &Path, config: Option<&Path>, options: ResetOptions) -> Result<()> {
    // Phase 1: gather
    let ctx = CommandContext::new(path, config).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!(
        "Collecting open PRs and branches of {}...",
        ctx.repo_slug().emphasis()
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let inventory = match gather_reset_inventory(&ctx.git, ctx.platform.as_ref(), &ctx.settings).await {
        Ok(inventory) => inventory,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };

    spinner.finish_with_message(format!(
        "{} Found {} open PRs, {} remote and {} local branches",
        check(),
        inventory.open_prs.len().accent(),
        inventory.remote_branches.len().accent(),
        inventory.local_branches.len().accent()
    ));

    // Phase 2: plan
    let plan = create_reset_plan(&inventory, &demo_prs(), &ctx.settings);

    if options.dry_run {
        print_plan("Reset plan", &plan);
        println!("{}", "Run without --dry-run to execute.".muted());
        return Ok(());
    }

    if !options.yes {
        println!(
            "{} {} will be force-reset to {}.",
            "Warning:".warn(),
            ctx.settings.base_branch.accent(),
            ctx.settings.base_ref.accent()
        );
        if !Confirm::new()
            .with_prompt("Proceed with reset?")
            .default(false)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
        println!();
    }

    // Phase 3: execute
    println!("{} {}", "Resetting".emphasis(), ctx.repo_slug().accent());
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
            "Demo reset complete:".muted(),
            format!("{}/pulls", ctx.platform.config().web_url()).accent()
        );
    }
    report.into_result().map(|_| ())
}
