//! Terminal styling helpers
//!
//! Colors go through `anstream`, which strips them when stdout is not a
//! terminal.

use indicatif::ProgressStyle;
use owo_colors::{Style, Styled};
use std::fmt::Display;

/// Check mark
pub const CHECK: &str = "✓";

/// Cross mark
pub const CROSS: &str = "✗";

/// Semantic styles for CLI output
pub trait Stylize: Display + Sized {
    /// De-emphasized text (hints, secondary info)
    fn muted(&self) -> Styled<&Self> {
        Style::new().dimmed().style(self)
    }

    /// Headings and labels
    fn emphasis(&self) -> Styled<&Self> {
        Style::new().bold().style(self)
    }

    /// Names and values the user cares about
    fn accent(&self) -> Styled<&Self> {
        Style::new().cyan().style(self)
    }

    /// Completed actions
    fn success(&self) -> Styled<&Self> {
        Style::new().green().style(self)
    }

    /// Warnings and skipped work
    fn warn(&self) -> Styled<&Self> {
        Style::new().yellow().style(self)
    }

    /// Failures
    fn error(&self) -> Styled<&Self> {
        Style::new().red().bold().style(self)
    }
}

impl<T: Display> Stylize for T {}

/// Green check mark
pub fn check() -> Styled<&'static str> {
    Style::new().green().style(CHECK)
}

/// Red cross
pub fn cross() -> Styled<&'static str> {
    Style::new().red().style(CROSS)
}

/// Dimmed arrow for list items
pub fn arrow() -> Styled<&'static str> {
    Style::new().dimmed().style("→")
}

/// Spinner used for network and git operations
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}

/// Render `text` as a terminal hyperlink to `url` when supported
pub fn link(text: &str, url: &str) -> String {
    if supports_hyperlinks::supports_hyperlinks() {
        terminal_link::Link::new(text, url).to_string()
    } else {
        text.to_string()
    }
}
