//! Expense category taxonomy.
//!
//! The category set is closed; free-text labels from older records survive
//! in [`Category::Other`] instead of open string dispatch.

use serde::{Deserialize, Serialize};

/// Kind of trip expense, used for grouping and icon selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Transport,
    Accommodation,
    Activities,
    Shopping,
    Flights,
    Settlement,
    /// Free-text category, carrying the original label as data.
    Other(String),
}

impl Category {
    /// Canonical wire key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Accommodation => "accommodation",
            Category::Activities => "activities",
            Category::Shopping => "shopping",
            Category::Flights => "flights",
            Category::Settlement => "settlement",
            Category::Other(label) => label,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Category::Food => "Food & Drinks",
            Category::Transport => "Transport",
            Category::Accommodation => "Accommodation",
            Category::Activities => "Activities",
            Category::Shopping => "Shopping",
            Category::Flights => "Flights",
            Category::Settlement => "Settlement",
            Category::Other(label) => label,
        }
    }

    /// Icon name rendered by the presentation layer.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "utensils",
            Category::Transport => "bus",
            Category::Accommodation => "bed",
            Category::Activities => "ticket",
            Category::Shopping => "shopping-bag",
            Category::Flights => "plane",
            Category::Settlement => "handshake",
            Category::Other(_) => "tag",
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "food" => Category::Food,
            "transport" => Category::Transport,
            "accommodation" => Category::Accommodation,
            "activities" => Category::Activities,
            "shopping" => Category::Shopping,
            "flights" => Category::Flights,
            "settlement" => Category::Settlement,
            _ => Category::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
