//! Café menu data and helpers
//!
//! The menu is static: it is parsed from `data/menu.toml` (embedded at
//! compile time) once at startup and never mutated afterwards.

mod price;

pub use price::Price;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

/// Raw menu file shipped with the app
pub const MENU_TOML: &str = include_str!("../../data/menu.toml");

/// Drink category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Coffee drinks
    Coffee,
    /// Tea drinks
    Tea,
    /// Everything else
    Other,
}

impl Category {
    /// Lowercase name, as used in the menu file and URLs
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coffee => "coffee",
            Self::Tea => "tea",
            Self::Other => "other",
        }
    }
}

// Categories order by name, not declaration order.
impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coffee" => Ok(Self::Coffee),
            "tea" => Ok(Self::Tea),
            "other" => Ok(Self::Other),
            other => Err(Error::MenuData(format!("unknown category '{other}'"))),
        }
    }
}

/// A single café product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display name
    pub name: String,
    /// Category the item is listed under
    pub category: Category,
    /// Price
    pub price: Price,
    /// One-line description
    pub description: String,
}

impl MenuItem {
    /// Convenience constructor
    pub fn new(name: &str, category: Category, price: Price, description: &str) -> Self {
        Self {
            name: name.to_string(),
            category,
            price,
            description: description.to_string(),
        }
    }
}

/// Aggregate limits the menu must respect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLimits {
    /// Maximum number of items; exceeding it prevents startup
    pub max_items: usize,
    /// Ceiling for the average item price
    pub max_average_price: Price,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MenuFile {
    max_items: usize,
    max_average_price: Price,
    #[serde(default)]
    items: Vec<MenuItem>,
}

/// A validated menu
#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem>,
    limits: MenuLimits,
}

impl Menu {
    /// Load the menu shipped with the app
    pub fn load() -> Result<Self> {
        Self::from_toml(MENU_TOML)
    }

    /// Parse a menu file and validate it
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: MenuFile =
            toml::from_str(content).map_err(|e| Error::MenuData(e.message().to_string()))?;
        Self::new(
            file.items,
            MenuLimits {
                max_items: file.max_items,
                max_average_price: file.max_average_price,
            },
        )
    }

    /// Build a menu from items and limits, validating it
    pub fn new(items: Vec<MenuItem>, limits: MenuLimits) -> Result<Self> {
        let menu = Self { items, limits };
        menu.validate()?;
        Ok(menu)
    }

    /// Check the startup invariants: size limit and unique names per category
    pub fn validate(&self) -> Result<()> {
        if self.items.len() > self.limits.max_items {
            return Err(Error::MenuTooLarge {
                count: self.items.len(),
                max: self.limits.max_items,
            });
        }

        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert((item.category, item.name.as_str())) {
                return Err(Error::DuplicateMenuItem {
                    name: item.name.clone(),
                    category: item.category.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Check the pricing policy enforced in CI
    ///
    /// Startup only cares about [`validate`](Self::validate); the average
    /// price ceiling is a merge gate, not a runtime invariant.
    pub fn check_policy(&self) -> Result<()> {
        self.validate()?;
        if let Some(average) = self.average_price()
            && average > self.limits.max_average_price
        {
            return Err(Error::AveragePriceTooHigh {
                average: average.to_string(),
                ceiling: self.limits.max_average_price.to_string(),
            });
        }
        Ok(())
    }

    /// Items in file order
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Configured limits
    pub const fn limits(&self) -> MenuLimits {
        self.limits
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Full menu sorted by category then name
    pub fn sorted(&self) -> Vec<MenuItem> {
        sorted_items(&self.items)
    }

    /// Sorted items restricted to one category
    pub fn filtered(&self, category: Category) -> Vec<MenuItem> {
        let mut items = self.sorted();
        items.retain(|item| item.category == category);
        items
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<Category> {
        categories(&self.items)
    }

    /// Sorted items grouped by category
    pub fn grouped(&self) -> Vec<(Category, Vec<MenuItem>)> {
        self.categories()
            .into_iter()
            .map(|category| (category, self.filtered(category)))
            .collect()
    }

    /// Mean price, rounded half up to the cent
    pub fn average_price(&self) -> Option<Price> {
        let count = u64::try_from(self.items.len()).ok().filter(|n| *n > 0)?;
        let total: u64 = self.items.iter().map(|i| u64::from(i.price.cents())).sum();
        let average = (total + count / 2) / count;
        u32::try_from(average).ok().map(Price::from_cents)
    }
}

/// Return items sorted by category, then name
///
/// The sort is stable, so items with equal keys keep their input order.
pub fn sorted_items(items: &[MenuItem]) -> Vec<MenuItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted
}

/// Return each distinct category once, sorted
pub fn categories(items: &[MenuItem]) -> Vec<Category> {
    items
        .iter()
        .map(|item| item.category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
