use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed product taxonomy. `General` is the fallback bucket and is never
/// matched by the query parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Breakfast,
    Condiments,
    Spices,
    ReadyToEat,
    Beverages,
    Dairy,
    General,
}

impl Category {
    /// Categories the parsers and heuristics scan, in priority order.
    pub const SEARCHABLE: [Category; 6] = [
        Category::Breakfast,
        Category::Condiments,
        Category::Spices,
        Category::ReadyToEat,
        Category::Beverages,
        Category::Dairy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breakfast => "breakfast",
            Category::Condiments => "condiments",
            Category::Spices => "spices",
            Category::ReadyToEat => "ready-to-eat",
            Category::Beverages => "beverages",
            Category::Dairy => "dairy",
            Category::General => "general",
        }
    }

    /// Human-facing label with hyphens replaced by spaces.
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(Category::Breakfast),
            "condiments" => Ok(Category::Condiments),
            "spices" => Ok(Category::Spices),
            "ready-to-eat" => Ok(Category::ReadyToEat),
            "beverages" => Ok(Category::Beverages),
            "dairy" => Ok(Category::Dairy),
            "general" => Ok(Category::General),
            other => Err(DomainError::UnknownCategory(other.to_owned())),
        }
    }
}

/// A purchasable item. Owned by the catalog and immutable for the duration
/// of a session; price is a currency-agnostic integer unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: u32,
    pub description: String,
    pub tags: Vec<String>,
    pub in_stock: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for category in Category::SEARCHABLE {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn ready_to_eat_label_replaces_hyphens() {
        assert_eq!(Category::ReadyToEat.label(), "ready to eat");
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("frozen".parse::<Category>().is_err());
    }
}
