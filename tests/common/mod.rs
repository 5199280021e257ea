//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;
mod recording_runner;

pub use mock_platform::{ClosePrCall, MockPlatformService};
pub use recording_runner::RecordingRunner;

use mq_cafe::types::{PlatformConfig, PullRequest};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Platform config for `acme/cafe` on github.com
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "acme".to_string(),
        repo: "cafe".to_string(),
        host: None,
    }
}

/// An open PR from `head` into main
pub fn make_pr(number: u64, head: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/acme/cafe/pull/{number}"),
        base_ref: "main".to_string(),
        head_ref: head.to_string(),
        title: format!("PR for {head}"),
        is_draft: false,
    }
}

/// Run git in `dir`, panicking on failure, returning trimmed stdout
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A working tree with the café files, pushed to a bare `origin`
///
/// The initial commit is on `main` and tagged `demo-base`.
pub struct TempCafeRepo {
    _remote_dir: TempDir,
    remote_path: PathBuf,
    work_dir: TempDir,
}

impl TempCafeRepo {
    pub fn new() -> Self {
        let remote_dir = TempDir::new().expect("create remote dir");
        let remote_path = remote_dir.path().join("cafe.git");
        std::fs::create_dir_all(&remote_path).expect("create remote path");
        git(&remote_path, &["init", "--bare", "--quiet"]);

        let work_dir = TempDir::new().expect("create work dir");
        let root = work_dir.path();
        git(root, &["init", "--quiet"]);
        git(root, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        git(root, &["config", "user.email", "test@test.com"]);
        git(root, &["config", "user.name", "Test User"]);
        git(root, &["config", "commit.gpgsign", "false"]);

        let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
        for file in ["data/menu.toml", "static/styles.css", "templates/index.html"] {
            let target = root.join(file);
            std::fs::create_dir_all(target.parent().unwrap()).unwrap();
            std::fs::copy(manifest.join(file), &target).expect("copy café file");
        }

        git(root, &["add", "-A"]);
        git(root, &["commit", "--quiet", "-m", "Initial café"]);
        git(root, &["tag", "demo-base"]);
        git(
            root,
            &["remote", "add", "origin", &remote_path.to_string_lossy()],
        );
        git(root, &["push", "--quiet", "origin", "main", "--tags"]);

        Self {
            _remote_dir: remote_dir,
            remote_path,
            work_dir,
        }
    }

    /// Root of the working tree
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Path of the bare remote
    pub fn remote_path(&self) -> &Path {
        &self.remote_path
    }

    /// Branch names on the remote
    pub fn remote_branches(&self) -> Vec<String> {
        git(
            &self.remote_path,
            &["for-each-ref", "--format=%(refname:short)", "refs/heads"],
        )
        .lines()
        .map(String::from)
        .collect()
    }

    /// Commit and push a change to `main`
    pub fn commit_to_main(&self, file: &str, content: &str, message: &str) {
        std::fs::write(self.path().join(file), content).unwrap();
        git(self.path(), &["add", "-A"]);
        git(self.path(), &["commit", "--quiet", "-m", message]);
        git(self.path(), &["push", "--quiet", "origin", "main"]);
    }
}
