//! Menu command - print the menu the app would serve

use crate::cli::style::Stylize;
use anstream::println;
use mq_cafe::error::Result;
use mq_cafe::menu::{Category, Menu, MenuItem};

fn print_item(item: &MenuItem, name_width: usize) {
    println!(
        "    {:<name_width$}  {}  {}",
        item.name,
        format!("${}", item.price).accent(),
        item.description.muted()
    );
}

/// Run the menu command
pub fn run_menu(category: Option<Category>) -> Result<()> {
    let menu = Menu::load()?;
    let name_width = menu.items().iter().map(|i| i.name.len()).max().unwrap_or(0);

    let groups = match category {
        Some(category) => vec![(category, menu.filtered(category))],
        None => menu.grouped(),
    };

    for (category, items) in &groups {
        println!("{}", category.emphasis());
        if items.is_empty() {
            println!("    {}", "(none)".muted());
        }
        for item in items {
            print_item(item, name_width);
        }
        println!();
    }

    let limits = menu.limits();
    println!(
        "{} {} of {} items",
        "Menu:".muted(),
        menu.len().accent(),
        limits.max_items
    );
    if let Some(average) = menu.average_price() {
        println!(
            "{} ${} (ceiling ${})",
            "Average:".muted(),
            average.accent(),
            limits.max_average_price
        );
    }
    Ok(())
}
