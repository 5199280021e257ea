//! cafe - Merge Queue Café app and demo tooling

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::{CreatePrsOptions, ResetOptions, RulesetOptions};
use mq_cafe::menu::Category;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cafe")]
#[command(about = "Merge Queue Café: a café menu app and its merge-queue demo tooling")]
#[command(version)]
struct Cli {
    /// Path to the repository (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    path: PathBuf,

    /// Settings file to use instead of cafe.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging and step-by-step progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the café web page
    Serve {
        /// Listen address, overriding settings
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print the menu
    Menu {
        /// Only show one category
        #[arg(long)]
        category: Option<Category>,
    },

    /// Check the menu against its size and price limits
    Check,

    /// Create all demo branches and PRs
    CreatePrs {
        /// Show the plan without running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Close demo PRs, reset the base branch and recreate the PRs
    Reset {
        /// Show the plan without running it
        #[arg(long)]
        dry_run: bool,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Create the "Merge Queue" branch ruleset
    Ruleset {
        /// Print the ruleset without creating it
        #[arg(long)]
        dry_run: bool,
    },

    /// Check GitHub authentication
    Auth,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "mq_cafe=debug,cafe=debug,tower_http=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let path = cli.path.as_path();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Serve { bind } => cli::run_serve(path, config, bind).await?,
        Commands::Menu { category } => cli::run_menu(category)?,
        Commands::Check => cli::run_check()?,
        Commands::CreatePrs { dry_run } => {
            cli::run_create_prs(
                path,
                config,
                CreatePrsOptions {
                    dry_run,
                    verbose: cli.verbose,
                },
            )
            .await?;
        }
        Commands::Reset { dry_run, yes } => {
            cli::run_reset(
                path,
                config,
                ResetOptions {
                    dry_run,
                    yes,
                    verbose: cli.verbose,
                },
            )
            .await?;
        }
        Commands::Ruleset { dry_run } => {
            cli::run_ruleset(path, config, RulesetOptions { dry_run }).await?;
        }
        Commands::Auth => cli::run_auth(path, config).await?,
    }

    Ok(())
}
