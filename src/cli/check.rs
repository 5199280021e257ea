//! Check command - verify the menu against its limits

use crate::cli::style::{Stylize, check};
use anstream::println;
use mq_cafe::error::Result;
use mq_cafe::menu::Menu;

/// Run the check command
///
/// Fails when the menu is too large, has duplicate items, or its average
/// price is above the ceiling.
pub fn run_check() -> Result<()> {
    let menu = Menu::load()?;
    menu.check_policy()?;

    let limits = menu.limits();
    println!(
        "{} Menu OK: {} of {} items",
        check(),
        menu.len().accent(),
        limits.max_items
    );
    if let Some(average) = menu.average_price() {
        println!(
            "  average price ${} (ceiling ${})",
            average.accent(),
            limits.max_average_price
        );
    }
    Ok(())
}
