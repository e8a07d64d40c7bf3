//! Rule-based cart recommendations with historical-frequency ranking.

use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::domain::{Cart, Category, Order, Product, ProductId};

/// Cap on returned recommendations.
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Products each triggered pairing rule may contribute.
const PER_RULE_LIMIT: usize = 2;

/// Historical top sellers appended after the rules.
const HISTORY_LIMIT: usize = 3;

/// A complementary-category pairing: when the cart holds `trigger`, offer
/// items from `suggest`.
struct PairingRule {
    trigger: Trigger,
    suggest: Category,
}

enum Trigger {
    /// Cart contains at least one item of this category.
    HasCategory(Category),
    /// Cart is non-empty and has nothing of this category.
    NonEmptyWithout(Category),
}

/// Evaluated top to bottom; each triggered rule contributes up to two
/// catalog-order products from its target category.
const PAIRING_RULES: &[PairingRule] = &[
    PairingRule { trigger: Trigger::HasCategory(Category::Breakfast), suggest: Category::Condiments },
    PairingRule { trigger: Trigger::HasCategory(Category::Spices), suggest: Category::ReadyToEat },
    PairingRule { trigger: Trigger::HasCategory(Category::Dairy), suggest: Category::Breakfast },
    PairingRule {
        trigger: Trigger::NonEmptyWithout(Category::Beverages),
        suggest: Category::Beverages,
    },
];

/// Ranked, deduplicated suggestions for the current cart: complementary
/// pairings first, then the customer's historical top sellers. Never
/// returns a product already in the cart; at most four results.
/// Deterministic for identical inputs.
pub fn recommend(cart: &Cart, catalog: &Catalog, history: &[Order]) -> Vec<Product> {
    let cart_categories: Vec<Category> =
        cart.items().iter().map(|item| item.product.category).collect();

    let mut picks: Vec<&Product> = Vec::new();

    for rule in PAIRING_RULES {
        let triggered = match rule.trigger {
            Trigger::HasCategory(category) => cart_categories.contains(&category),
            Trigger::NonEmptyWithout(category) => {
                !cart.is_empty() && !cart_categories.contains(&category)
            }
        };
        if !triggered {
            continue;
        }

        picks.extend(
            catalog
                .in_category(rule.suggest)
                .filter(|product| !cart.contains(&product.id))
                .take(PER_RULE_LIMIT),
        );
    }

    if !history.is_empty() {
        picks.extend(top_historical_products(catalog, history, cart));
    }

    let mut seen: Vec<&ProductId> = Vec::new();
    let mut recommendations = Vec::new();
    for product in picks {
        if seen.contains(&&product.id) {
            continue;
        }
        seen.push(&product.id);
        recommendations.push(product.clone());
        if recommendations.len() == MAX_RECOMMENDATIONS {
            break;
        }
    }
    recommendations
}

/// Top three products by cumulative purchased quantity, excluding cart
/// contents. Stable sort keeps first-seen order for equal quantities.
fn top_historical_products<'a>(
    catalog: &'a Catalog,
    history: &[Order],
    cart: &Cart,
) -> Vec<&'a Product> {
    let mut totals: HashMap<&ProductId, u32> = HashMap::new();
    let mut first_seen: Vec<&ProductId> = Vec::new();

    for order in history {
        for item in &order.items {
            let entry = totals.entry(&item.product.id).or_insert(0);
            if *entry == 0 {
                first_seen.push(&item.product.id);
            }
            *entry += item.quantity;
        }
    }

    let mut ranked: Vec<(&ProductId, u32)> =
        first_seen.iter().map(|id| (*id, totals[id])).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .filter_map(|(id, _)| catalog.find_by_id(id.as_str()))
        .filter(|product| !cart.contains(&product.id))
        .take(HISTORY_LIMIT)
        .collect()
}
