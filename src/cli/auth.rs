//! Auth command - check GitHub authentication

use crate::cli::style::{Stylize, check, spinner_style};
use anstream::println;
use indicatif::ProgressBar;
use mq_cafe::auth::{get_github_auth, test_github_auth};
use mq_cafe::config::load_settings;
use mq_cafe::error::Result;
use mq_cafe::process::SystemRunner;
use std::path::Path;
use std::time::Duration;

/// Run the auth command
pub async fn run_auth(path: &Path, config: Option<&Path>) -> Result<()> {
    let settings = load_settings(path, config)?;
    // Auth works without a configured repository; it only needs the host.
    let platform = settings.platform_config().ok();
    let host = platform.as_ref().and_then(|p| p.host.as_deref());

    let auth = get_github_auth(&SystemRunner, host).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!(
        "Checking token from {}...",
        auth.source.to_string().emphasis()
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let login = match test_github_auth(&auth).await {
        Ok(login) => login,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };

    spinner.finish_with_message(format!(
        "{} Authenticated as {} ({})",
        check(),
        login.accent(),
        auth.source.muted()
    ));

    match platform {
        Some(platform) => println!(
            "  {} {} via {}",
            "Repository:".muted(),
            platform.slug().accent(),
            settings.backend
        ),
        None => println!(
            "  {}",
            "REPO is not set; PR commands will fail until it is.".warn()
        ),
    }
    Ok(())
}
