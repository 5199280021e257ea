//! Plan and report printing shared by the PR commands

use crate::cli::style::{CHECK, Stylize, arrow};
use anstream::println;
use mq_cafe::runner::{ExecutionReport, Plan, StepPolicy};

/// Print every step of `plan`, marking optional ones
pub fn print_plan(title: &str, plan: &Plan) {
    println!("{}:", title.emphasis());
    println!();

    if plan.is_empty() {
        println!("  {}", "Nothing to do".muted());
        println!();
        return;
    }

    for step in &plan.steps {
        match step.policy {
            StepPolicy::Required => println!("  {} {}", arrow(), step),
            StepPolicy::Optional => {
                println!("  {} {} {}", arrow(), step, "(optional)".muted());
            }
        }
    }
    println!();
}

/// Print the outcome of a run
pub fn print_report(report: &ExecutionReport, total: usize) {
    println!();
    match &report.aborted {
        None => println!(
            "{} {} steps, {} PRs created",
            format!("{CHECK} Done:").success(),
            report.completed.accent(),
            report.created_prs.len().accent()
        ),
        Some(failure) => {
            println!(
                "{} after {} of {total} steps",
                "Aborted".error(),
                report.completed.accent()
            );
            println!("   {} {}", "Failed:".warn(), failure.step.warn());
            println!("          {}", failure.message.muted());
        }
    }

    if !report.skipped_patches.is_empty() {
        println!(
            "   {} {} file change(s) skipped (target text not found)",
            "⚠".warn(),
            report.skipped_patches.len()
        );
        for skipped in &report.skipped_patches {
            println!("      {} {}", skipped.path.accent(), skipped.reason.muted());
        }
    }

    if !report.warnings.is_empty() {
        println!(
            "   {} {} optional step(s) failed",
            "⚠".warn(),
            report.warnings.len()
        );
        for warning in &report.warnings {
            println!("      {} {}", warning.step, warning.message.muted());
        }
    }
}
