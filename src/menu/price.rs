//! Exact decimal prices stored in cents

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A menu price in whole cents
///
/// Parsed from decimal strings (`"3.50"`, `"4"`, `".5"`) so the menu file
/// never goes through floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(u32);

impl Price {
    /// Build a price from cents
    pub const fn from_cents(cents: u32) -> Self {
        Self(cents)
    }

    /// Amount in cents
    pub const fn cents(self) -> u32 {
        self.0
    }
}

impl FromStr for Price {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim().trim_start_matches('$');
        let invalid = || Error::MenuData(format!("invalid price '{s}'"));

        let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));
        if (whole.is_empty() && frac.is_empty()) || frac.len() > 2 {
            return Err(invalid());
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let dollars: u32 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let cents: u32 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u32>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for Price {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_decimals() {
        assert_eq!("3.50".parse::<Price>().unwrap().cents(), 350);
        assert_eq!("12.05".parse::<Price>().unwrap().cents(), 1205);
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!("4".parse::<Price>().unwrap().cents(), 400);
        assert_eq!("0.5".parse::<Price>().unwrap().cents(), 50);
        assert_eq!(".5".parse::<Price>().unwrap().cents(), 50);
        assert_eq!("$2.75".parse::<Price>().unwrap().cents(), 275);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", ".", "abc", "1.234", "-1.00", "1.2.3", "4,50"] {
            assert!(bad.parse::<Price>().is_err(), "expected '{bad}' to fail");
        }
    }

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Price::from_cents(405).to_string(), "4.05");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
        assert_eq!(Price::from_cents(1200).to_string(), "12.00");
    }
}
