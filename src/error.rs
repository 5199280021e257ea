//! Error types for mq-cafe

use thiserror::Error;

/// Errors produced by the café app and its demo tooling
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is missing or malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// Menu data could not be parsed
    #[error("invalid menu data: {0}")]
    MenuData(String),

    /// The menu holds more items than allowed; the app refuses to start
    #[error("menu has {count} items, exceeding the maximum of {max}")]
    MenuTooLarge {
        /// Number of items on the menu
        count: usize,
        /// Configured maximum
        max: usize,
    },

    /// Two items in one category share a name
    #[error("duplicate menu item '{name}' in category '{category}'")]
    DuplicateMenuItem {
        /// Item name
        name: String,
        /// Category the duplicate appears in
        category: String,
    },

    /// Average price is above the configured ceiling
    #[error("average price {average} exceeds the ceiling of {ceiling}")]
    AveragePriceTooHigh {
        /// Current average, formatted
        average: String,
        /// Configured ceiling, formatted
        ceiling: String,
    },

    /// An external command exited unsuccessfully
    #[error("`{command}` failed (exit {code}): {stderr}")]
    Command {
        /// Rendered command line
        command: String,
        /// Exit code (-1 when killed by a signal)
        code: i32,
        /// Trimmed stderr
        stderr: String,
    },

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Platform error (generic PR operations)
    #[error("platform error: {0}")]
    Platform(String),

    /// Authentication error
    #[error("authentication error: {0}")]
    Auth(String),

    /// Template rendering error
    #[error("template error: {0}")]
    Template(String),

    /// A required step failed and the run was aborted
    #[error("required step failed: {step}: {message}")]
    StepFailed {
        /// Description of the failed step
        step: String,
        /// Failure message
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err.to_string())
    }
}

/// Result type alias for mq-cafe
pub type Result<T> = std::result::Result<T, Error>;
