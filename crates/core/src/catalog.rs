//! Catalog provider: an ordered, immutable sequence of products.
//!
//! The engine never mutates the catalog; lookups preserve catalog order so
//! every heuristic stays deterministic.

use crate::domain::{Category, Product, ProductId};

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

/// Seed row for the built-in demo catalog.
#[derive(Debug, Clone, Copy)]
struct ProductSeed {
    id: &'static str,
    name: &'static str,
    category: Category,
    price: u32,
    description: &'static str,
    tags: &'static [&'static str],
    in_stock: bool,
}

const PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "prod-dosa-batter",
        name: "Dosa Batter",
        category: Category::Breakfast,
        price: 80,
        description: "Fresh fermented batter for crispy dosas",
        tags: &["dosa", "batter", "south-indian"],
        in_stock: true,
    },
    ProductSeed {
        id: "prod-idly-batter",
        name: "Idly Batter",
        category: Category::Breakfast,
        price: 75,
        description: "Soft idly batter, ground daily",
        tags: &["idly", "batter", "steamed"],
        in_stock: true,
    },
    ProductSeed {
        id: "prod-upma-mix",
        name: "Instant Upma Mix",
        category: Category::Breakfast,
        price: 60,
        description: "Five-minute rava upma mix",
        tags: &["upma", "instant", "breakfast"],
        in_stock: true,
    },
    ProductSeed {
        id: "prod-coconut-chutney",
        name: "Coconut Chutney",
        category: Category::Condiments,
        price: 50,
        description: "Classic coconut chutney with tempering",
        tags: &["chutney", "coconut", "side"],
        in_stock: true,
    },
    ProductSeed {
        id: "prod-mango-pickle",
        name: "Mango Pickle",
        category: Category::Condiments,
        price: 120,
        description: "Tangy raw mango pickle in gingelly oil",
        tags: &["pickle", "mango", "traditional"],
        in_stock: true,
    },
    ProductSeed {
        id: "prod-tomato-chutney",
        name: "Tomato Chutney",
        category: Category::Condiments,
        price: 55,
        description: "Spiced tomato chutney for idly and dosa",
        tags: &["chutney", "tomato", "side"],
        in_stock: false,
    },
    ProductSeed {
        id: "prod-sambar-powder",
        name: "Sambar Powder",
        category: Category::Spices,
        price: 90,
        description: "Stone-ground sambar masala blend",
        tags: &["sambar", "masala", "powder"],
        in_stock: true,
    },
    ProductSeed {
        id: "prod-rasam-powder",
        name: "Rasam Powder",
        category: Category::Spices,
        price: 85,
        description: "Peppery rasam spice blend",
        tags: &["rasam", "masala", "powder"],
        in_stock: true,
    },
    ProductSeed {
        id: "prod-ready-sambar",
        name: "Ready-to-Eat Sambar",
        category: Category::ReadyToEat,
        price: 110,
        description: "Heat-and-serve sambar with vegetables",
        tags: &["sambar", "instant", "ready"],
        in_stock: true,
    },
    ProductSeed {
        id: "prod-ready-pongal",
        name: "Ready-to-Eat Pongal",
        category: Category::ReadyToEat,
        price: 95,
        description: "Ghee pongal, ready in two minutes",
        tags: &["pongal", "instant", "ready"],
        in_stock: true,
    },
    ProductSeed {
        id: "prod-filter-coffee",
        name: "Filter Coffee Powder",
        category: Category::Beverages,
        price: 150,
        description: "80:20 coffee-chicory filter blend",
        tags: &["coffee", "filter", "beverage"],
        in_stock: true,
    },
    ProductSeed {
        id: "prod-masala-tea",
        name: "Masala Tea Powder",
        category: Category::Beverages,
        price: 130,
        description: "Cardamom and ginger tea blend",
        tags: &["tea", "masala", "beverage"],
        in_stock: true,
    },
    ProductSeed {
        id: "prod-ghee",
        name: "Premium Ghee",
        category: Category::Dairy,
        price: 250,
        description: "Slow-simmered clarified butter",
        tags: &["ghee", "dairy", "premium"],
        in_stock: true,
    },
    ProductSeed {
        id: "prod-curd",
        name: "Set Curd",
        category: Category::Dairy,
        price: 40,
        description: "Thick set curd in clay pots",
        tags: &["curd", "yogurt", "dairy"],
        in_stock: true,
    },
];

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Built-in demo grocery catalog covering every searchable category.
    pub fn demo() -> Self {
        let products = PRODUCT_SEEDS
            .iter()
            .map(|seed| Product {
                id: ProductId::new(seed.id),
                name: seed.name.to_owned(),
                category: seed.category,
                price: seed.price,
                description: seed.description.to_owned(),
                tags: seed.tags.iter().map(|tag| (*tag).to_owned()).collect(),
                in_stock: seed.in_stock,
            })
            .collect();
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id.as_str() == id)
    }

    /// Products of one category, in catalog order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |product| product.category == category)
    }
}

/// Keyword table for auto-categorization of loosely described products.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Breakfast, &["idly", "dosa", "upma", "breakfast", "morning", "batter"]),
    (Category::Condiments, &["chutney", "pickle", "sauce", "condiment", "dip"]),
    (Category::Spices, &["powder", "masala", "spice", "seasoning", "blend", "rasam"]),
    (Category::ReadyToEat, &["ready", "instant", "mix", "quick", "prepared"]),
    (Category::Beverages, &["coffee", "tea", "drink", "beverage", "filter"]),
    (Category::Dairy, &["ghee", "butter", "milk", "cream", "cheese", "yogurt"]),
];

/// Assign a category by keyword hits over the name and description.
/// Falls back to `General` when nothing scores.
pub fn categorize(name: &str, description: &str) -> Category {
    let text = format!("{name} {description}").to_lowercase();

    let mut best = Category::General;
    let mut best_score = 0usize;
    for (category, keywords) in CATEGORY_KEYWORDS {
        let score = keywords.iter().filter(|keyword| text.contains(**keyword)).count();
        if score > best_score {
            best = *category;
            best_score = score;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_covers_every_searchable_category() {
        let catalog = Catalog::demo();
        for category in Category::SEARCHABLE {
            assert!(
                catalog.in_category(category).next().is_some(),
                "no product in {category}"
            );
        }
    }

    #[test]
    fn demo_catalog_ids_are_unique() {
        let catalog = Catalog::demo();
        for product in catalog.products() {
            let count = catalog
                .products()
                .iter()
                .filter(|other| other.id == product.id)
                .count();
            assert_eq!(count, 1, "duplicate id {}", product.id);
        }
    }

    #[test]
    fn categorize_picks_highest_scoring_category() {
        assert_eq!(categorize("Dosa Batter", "morning breakfast staple"), Category::Breakfast);
        assert_eq!(categorize("Ghee", "clarified butter"), Category::Dairy);
    }

    #[test]
    fn categorize_falls_back_to_general() {
        assert_eq!(categorize("Gift Card", "store credit voucher"), Category::General);
    }
}
