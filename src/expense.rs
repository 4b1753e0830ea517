//! Expense record model and the closed category set.

use crate::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spending category.
///
/// A fixed set: adding a category is a schema change, not a runtime data
/// value. The declaration order doubles as the menu and report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Travel,
    Home,
    Health,
    Shopping,
    Other,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Travel,
        Category::Home,
        Category::Health,
        Category::Shopping,
        Category::Other,
    ];

    /// Canonical name, as stored in the backing file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Home => "Home",
            Category::Health => "Health",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error for [`Category::from_str`] on text outside the fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCategory;

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "travel" => Ok(Category::Travel),
            "home" => Ok(Category::Home),
            "health" => Ok(Category::Health),
            "shopping" => Ok(Category::Shopping),
            "other" => Ok(Category::Other),
            _ => Err(UnknownCategory),
        }
    }
}

/// A single recorded expense.
///
/// Serde renames match the backing file's column names, so records
/// (de)serialize directly as CSV rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Ledger-unique identifier, assigned as `max existing id + 1`.
    #[serde(rename = "ID")]
    pub id: u64,

    /// Date the expense was recorded, fixed at creation.
    #[serde(rename = "Date")]
    pub date: NaiveDate,

    /// Free-form label.
    #[serde(rename = "Name")]
    pub name: String,

    /// One of the fixed categories.
    #[serde(rename = "Category")]
    pub category: Category,

    /// Monetary amount. Non-negativity is not enforced.
    #[serde(rename = "Amount")]
    pub amount: Money,
}
