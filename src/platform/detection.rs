//! Repository identifier parsing

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static SSH_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:ssh://)?git@([^:/]+)[:/]([^/]+)/([^/]+?)(?:\.git)?/?$")
        .expect("static regex is valid")
});

/// Parse a repository identifier into a platform config
///
/// Accepts `owner/repo`, `host/owner/repo`, HTTPS URLs and SSH remotes.
/// `github.com` is normalized to no custom host.
pub fn parse_repo_slug(input: &str) -> Result<PlatformConfig> {
    let input = input.trim();
    let invalid = || {
        Error::Config(format!(
            "invalid repository '{input}' (expected 'owner/repo')"
        ))
    };

    let (host, owner, repo) = if let Some(caps) = SSH_REMOTE.captures(input) {
        (
            Some(caps[1].to_string()),
            caps[2].to_string(),
            caps[3].to_string(),
        )
    } else if input.contains("://") {
        let url = Url::parse(input).map_err(|_| invalid())?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();
        let [owner, repo] = segments.as_slice() else {
            return Err(invalid());
        };
        (
            url.host_str().map(String::from),
            (*owner).to_string(),
            repo.trim_end_matches(".git").to_string(),
        )
    } else {
        let parts: Vec<&str> = input.trim_end_matches('/').split('/').collect();
        match parts.as_slice() {
            [owner, repo] => (None, (*owner).to_string(), (*repo).to_string()),
            [host, owner, repo] => (
                Some((*host).to_string()),
                (*owner).to_string(),
                (*repo).to_string(),
            ),
            _ => return Err(invalid()),
        }
    };

    if owner.is_empty() || repo.is_empty() {
        return Err(invalid());
    }

    Ok(PlatformConfig {
        owner,
        repo,
        host: host.filter(|h| h != "github.com"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_repo() {
        let config = parse_repo_slug("wilsonwong1990-org/merge-queue-cafe").unwrap();
        assert_eq!(config.owner, "wilsonwong1990-org");
        assert_eq!(config.repo, "merge-queue-cafe");
        assert!(config.host.is_none());
    }

    #[test]
    fn test_https_url() {
        let config = parse_repo_slug("https://github.com/acme/cafe.git").unwrap();
        assert_eq!(config.slug(), "acme/cafe");
        assert!(config.host.is_none());
    }

    #[test]
    fn test_ssh_remote_enterprise_host() {
        let config = parse_repo_slug("git@ghe.example.com:acme/cafe.git").unwrap();
        assert_eq!(config.slug(), "acme/cafe");
        assert_eq!(config.host.as_deref(), Some("ghe.example.com"));
    }

    #[test]
    fn test_host_prefixed_slug() {
        let config = parse_repo_slug("ghe.example.com/acme/cafe").unwrap();
        assert_eq!(config.host.as_deref(), Some("ghe.example.com"));
    }

    #[test]
    fn test_rejects_bare_name() {
        assert!(matches!(parse_repo_slug("cafe"), Err(Error::Config(_))));
        assert!(matches!(parse_repo_slug("/cafe"), Err(Error::Config(_))));
        assert!(matches!(parse_repo_slug("a/b/c/d"), Err(Error::Config(_))));
    }
}
