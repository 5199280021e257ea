//! GitHub token discovery

use super::AuthSource;
use crate::error::{Error, Result};
use crate::process::{CommandRunner, Invocation};
use octocrab::Octocrab;
use tracing::debug;

/// Environment variables checked for a token, in order
const TOKEN_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// A resolved GitHub token
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// The token
    pub token: String,
    /// Where it came from
    pub source: AuthSource,
    /// Enterprise host, if any
    pub host: Option<String>,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .field("host", &self.host)
            .finish()
    }
}

/// Resolve a GitHub token from the environment or `gh auth token`
pub async fn get_github_auth(
    runner: &dyn CommandRunner,
    host: Option<&str>,
) -> Result<GitHubAuthConfig> {
    for var in TOKEN_VARS {
        if let Ok(token) = std::env::var(var)
            && !token.trim().is_empty()
        {
            debug!(var, "using GitHub token from environment");
            return Ok(GitHubAuthConfig {
                token: token.trim().to_string(),
                source: AuthSource::EnvVar,
                host: host.map(String::from),
            });
        }
    }

    let mut args = vec!["auth".to_string(), "token".to_string()];
    if let Some(h) = host {
        args.push("--hostname".into());
        args.push(h.to_string());
    }

    let token = runner
        .run_checked(&Invocation::new("gh", args))
        .await
        .map_err(|e| {
            Error::Auth(format!(
                "no GitHub token found: set GH_TOKEN or run 'gh auth login' ({e})"
            ))
        })?;
    if token.is_empty() {
        return Err(Error::Auth(
            "gh returned an empty token; run 'gh auth login'".to_string(),
        ));
    }

    debug!("using GitHub token from gh CLI");
    Ok(GitHubAuthConfig {
        token,
        source: AuthSource::Cli,
        host: host.map(String::from),
    })
}

/// Verify a token by fetching the authenticated user, returning the login
pub async fn test_github_auth(config: &GitHubAuthConfig) -> Result<String> {
    let mut builder = Octocrab::builder().personal_token(config.token.clone());
    if let Some(host) = &config.host {
        builder = builder
            .base_uri(format!("https://{host}/api/v3"))
            .map_err(|e| Error::Auth(e.to_string()))?;
    }
    let client = builder.build().map_err(|e| Error::Auth(e.to_string()))?;

    let user = client
        .current()
        .user()
        .await
        .map_err(|e| Error::Auth(format!("token rejected: {e}")))?;
    Ok(user.login)
}
