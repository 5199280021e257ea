//! Drink PRs

use crate::demo::{DemoPr, MENU_PATH};
use crate::patch::FileChange;

/// A drink one PR adds to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drink {
    /// Slot marker id in the menu file
    pub slot: &'static str,
    /// Display name
    pub name: &'static str,
    /// Menu category
    pub category: &'static str,
    /// Price as written in the menu file
    pub price: &'static str,
    /// One-line description
    pub description: &'static str,
}

/// Drinks in PR order
pub const DRINKS: [Drink; 8] = [
    Drink {
        slot: "espresso",
        name: "Espresso",
        category: "coffee",
        price: "4.00",
        description: "A bold, concentrated shot of pure coffee.",
    },
    Drink {
        slot: "latte",
        name: "Latte",
        category: "coffee",
        price: "5.50",
        description: "Espresso with steamed milk and a touch of foam.",
    },
    Drink {
        slot: "cappuccino",
        name: "Cappuccino",
        category: "coffee",
        price: "5.25",
        description: "Equal parts espresso, steamed milk, and foam.",
    },
    Drink {
        slot: "americano",
        name: "Americano",
        category: "coffee",
        price: "4.25",
        description: "Espresso diluted with hot water for a smooth finish.",
    },
    Drink {
        slot: "cold-brew",
        name: "Cold Brew",
        category: "coffee",
        price: "5.00",
        description: "Slow-steeped for 12 hours, served over ice.",
    },
    Drink {
        slot: "matcha-latte",
        name: "Matcha Latte",
        category: "tea",
        price: "5.75",
        description: "Ceremonial-grade matcha whisked with oat milk.",
    },
    Drink {
        slot: "chai-latte",
        name: "Chai Latte",
        category: "tea",
        price: "5.50",
        description: "Spiced black tea with steamed milk and honey.",
    },
    Drink {
        slot: "hot-chocolate",
        name: "Hot Chocolate",
        category: "other",
        price: "4.50",
        description: "Rich dark chocolate melted into steamed milk.",
    },
];

impl Drink {
    /// Slot marker line in the menu file
    pub fn marker(&self) -> String {
        format!("# slot:{}", self.slot)
    }

    /// `[[items]]` table that replaces the marker
    pub fn menu_entry(&self) -> String {
        format!(
            "[[items]]\nname = \"{}\"\ncategory = \"{}\"\nprice = \"{}\"\ndescription = \"{}\"",
            self.name, self.category, self.price, self.description
        )
    }

    /// The PR adding this drink
    pub fn pull_request(&self) -> DemoPr {
        DemoPr {
            branch: format!("add-{}", self.slot),
            title: format!("Add {} to menu", self.name),
            body: format!(
                "Adds **{}** (${}) to the café menu under the *{}* category.\n\n\
                 Checks pass on their own: the menu stays within the 6-item limit.",
                self.name, self.price, self.category
            ),
            changes: vec![FileChange::patch(
                MENU_PATH,
                &self.marker(),
                &self.menu_entry(),
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drink_pr_shape() {
        let pr = DRINKS[1].pull_request();
        assert_eq!(pr.branch, "add-latte");
        assert_eq!(pr.title, "Add Latte to menu");
        assert!(pr.body.contains("($5.50)"));
        assert_eq!(pr.changes[0].search.as_deref(), Some("# slot:latte"));
        assert!(pr.changes[0].replace.starts_with("[[items]]\nname = \"Latte\""));
    }

    #[test]
    fn test_markers_do_not_overlap() {
        for a in &DRINKS {
            for b in &DRINKS {
                if a.slot != b.slot {
                    assert!(!a.marker().contains(&b.marker()), "{} contains {}", a.slot, b.slot);
                }
            }
        }
    }
}
