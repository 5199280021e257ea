//! Literal search/replace file changes
//!
//! Each change either creates a file outright or swaps the first occurrence
//! of an exact snippet. A snippet that is not found leaves the file untouched
//! and is reported as skipped; the caller decides whether that matters.

use crate::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// A single file change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Path relative to the repository root
    pub path: String,
    /// Snippet to look for; `None` creates (or overwrites) the file
    pub search: Option<String>,
    /// Replacement snippet, or full content for new files
    pub replace: String,
}

impl FileChange {
    /// Replace the first occurrence of `search` in `path`
    pub fn patch(path: &str, search: &str, replace: &str) -> Self {
        Self {
            path: path.to_string(),
            search: Some(search.to_string()),
            replace: replace.to_string(),
        }
    }

    /// Create `path` with `content`
    pub fn create(path: &str, content: &str) -> Self {
        Self {
            path: path.to_string(),
            search: None,
            replace: content.to_string(),
        }
    }

    /// Whether this change creates a new file
    pub const fn is_create(&self) -> bool {
        self.search.is_none()
    }
}

impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_create() {
            write!(f, "create {}", self.path)
        } else {
            write!(f, "patch {}", self.path)
        }
    }
}

/// What happened when a change was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// A new file was written
    Created,
    /// The snippet was found and replaced
    Patched,
    /// Nothing was written
    Skipped {
        /// Why the change was skipped
        reason: String,
    },
}

impl PatchOutcome {
    /// Whether the change was skipped
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Replace the first occurrence of `search` in `content`
///
/// Returns `None` when `search` does not occur.
pub fn apply_to_str(content: &str, search: &str, replace: &str) -> Option<String> {
    content
        .contains(search)
        .then(|| content.replacen(search, replace, 1))
}

/// Apply a change to a file under `root`
pub fn apply_change(root: &Path, change: &FileChange) -> Result<PatchOutcome> {
    let path = root.join(&change.path);

    let Some(search) = change.search.as_deref() else {
        debug!(path = %change.path, "creating file");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, format!("{}\n", change.replace))?;
        return Ok(PatchOutcome::Created);
    };

    debug!(path = %change.path, "patching file");
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %change.path, "file not found, skipping");
            return Ok(PatchOutcome::Skipped {
                reason: format!("{} does not exist", change.path),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let Some(updated) = apply_to_str(&content, search, &change.replace) else {
        warn!(path = %change.path, "search string not found, skipping");
        return Ok(PatchOutcome::Skipped {
            reason: format!("search string not found in {}", change.path),
        });
    };

    fs::write(&path, updated)?;
    Ok(PatchOutcome::Patched)
}
