//! Personalized discount offers derived from order history.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::{Category, Order, Product};

/// Cap on offers returned per customer.
pub const MAX_OFFERS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub title: String,
    pub description: String,
    pub products: Vec<Product>,
    /// Percentage, 0-100.
    pub discount: u8,
}

/// Generate up to three offers, in generation order:
/// welcome offer for empty history; otherwise top-category messaging,
/// complementary-category gaps, then a replenishment offer.
///
/// Top-category ties break toward the earlier category in declaration
/// order (breakfast first), via the `BTreeMap` accumulation below.
pub fn personalized_offers(history: &[Order], catalog: &Catalog) -> Vec<Offer> {
    let mut offers = Vec::new();

    if history.is_empty() {
        offers.push(Offer {
            title: "Welcome Offer".to_owned(),
            description: "Get 15% off on your first South Indian breakfast combo!".to_owned(),
            products: catalog.in_category(Category::Breakfast).take(3).cloned().collect(),
            discount: 15,
        });
        return offers;
    }

    let mut category_totals: BTreeMap<Category, u32> = BTreeMap::new();
    let mut product_totals: HashMap<String, u32> = HashMap::new();
    let mut product_first_seen: Vec<String> = Vec::new();

    for order in history {
        for item in &order.items {
            *category_totals.entry(item.product.category).or_insert(0) += item.quantity;
            let entry = product_totals.entry(item.product.id.as_str().to_owned()).or_insert(0);
            if *entry == 0 {
                product_first_seen.push(item.product.id.as_str().to_owned());
            }
            *entry += item.quantity;
        }
    }

    // min_by with a reversed comparator keeps the FIRST of equal maxima,
    // so ties go to the earlier category in declaration order.
    let top_category = category_totals
        .iter()
        .min_by(|a, b| b.1.cmp(a.1))
        .map(|(category, _)| *category);

    match top_category {
        Some(Category::Breakfast) => offers.push(Offer {
            title: "South Indian Breakfast Lover".to_owned(),
            description: "Since you love South Indian breakfast, here's 10% off on Chutneys!"
                .to_owned(),
            products: catalog.in_category(Category::Condiments).cloned().collect(),
            discount: 10,
        }),
        Some(Category::Spices) => offers.push(Offer {
            title: "Spice Master".to_owned(),
            description: "Complete your spice collection with 12% off on ready-to-eat items!"
                .to_owned(),
            products: catalog.in_category(Category::ReadyToEat).cloned().collect(),
            discount: 12,
        }),
        _ => {}
    }

    let purchased = |category: Category| category_totals.get(&category).copied().unwrap_or(0) > 0;

    if purchased(Category::Breakfast) && !purchased(Category::Dairy) {
        offers.push(Offer {
            title: "Perfect Pairing".to_owned(),
            description: "Add premium ghee to enhance your breakfast experience - 8% off!"
                .to_owned(),
            products: catalog.in_category(Category::Dairy).cloned().collect(),
            discount: 8,
        });
    }

    if purchased(Category::Spices) && !purchased(Category::Beverages) {
        offers.push(Offer {
            title: "Complete Your Meal".to_owned(),
            description: "Enjoy authentic filter coffee with your spicy meals - 15% off!"
                .to_owned(),
            products: catalog.in_category(Category::Beverages).cloned().collect(),
            discount: 15,
        });
    }

    let frequent: Vec<Product> = product_first_seen
        .iter()
        .filter(|id| product_totals[*id] >= 2)
        .filter_map(|id| catalog.find_by_id(id))
        .take(3)
        .cloned()
        .collect();

    if !frequent.is_empty() {
        offers.push(Offer {
            title: "Restock Your Favorites".to_owned(),
            description: "Time to restock your favorite items with 5% off!".to_owned(),
            products: frequent,
            discount: 5,
        });
    }

    offers.truncate(MAX_OFFERS);
    offers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cart, CartItem, CustomerInfo};

    fn order_of(catalog: &Catalog, lines: &[(&str, u32)]) -> Order {
        let items: Vec<CartItem> = lines
            .iter()
            .map(|(id, quantity)| CartItem {
                product: catalog.find_by_id(id).expect("seed product").clone(),
                quantity: *quantity,
            })
            .collect();
        Order::place(
            "TG-2",
            items,
            CustomerInfo { name: "Ravi".into(), contact: None, address: None },
        )
    }

    #[test]
    fn empty_history_yields_exactly_the_welcome_offer() {
        let catalog = Catalog::demo();
        let offers = personalized_offers(&[], &catalog);

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].title, "Welcome Offer");
        assert_eq!(offers[0].discount, 15);
        assert_eq!(offers[0].products.len(), 3);
        assert!(offers[0].products.iter().all(|p| p.category == Category::Breakfast));
    }

    #[test]
    fn breakfast_dominance_brings_the_condiments_offer() {
        let catalog = Catalog::demo();
        let history = vec![order_of(&catalog, &[("prod-dosa-batter", 5), ("prod-ghee", 1)])];

        let offers = personalized_offers(&history, &catalog);

        assert_eq!(offers[0].title, "South Indian Breakfast Lover");
        assert_eq!(offers[0].discount, 10);
        assert!(offers[0].products.iter().all(|p| p.category == Category::Condiments));
    }

    #[test]
    fn spice_dominance_brings_the_ready_to_eat_offer() {
        let catalog = Catalog::demo();
        let history = vec![order_of(&catalog, &[("prod-sambar-powder", 4)])];

        let offers = personalized_offers(&history, &catalog);

        assert_eq!(offers[0].title, "Spice Master");
        assert_eq!(offers[0].discount, 12);
    }

    #[test]
    fn breakfast_without_dairy_adds_the_pairing_offer() {
        let catalog = Catalog::demo();
        let history = vec![order_of(&catalog, &[("prod-idly-batter", 2)])];

        let offers = personalized_offers(&history, &catalog);

        assert!(offers.iter().any(|offer| offer.title == "Perfect Pairing" && offer.discount == 8));
    }

    #[test]
    fn spices_without_beverages_adds_the_meal_offer() {
        let catalog = Catalog::demo();
        let history = vec![order_of(&catalog, &[("prod-rasam-powder", 1)])];

        let offers = personalized_offers(&history, &catalog);

        assert!(offers
            .iter()
            .any(|offer| offer.title == "Complete Your Meal" && offer.discount == 15));
    }

    #[test]
    fn repeat_purchases_earn_the_restock_offer() {
        let catalog = Catalog::demo();
        let history = vec![
            order_of(&catalog, &[("prod-curd", 1)]),
            order_of(&catalog, &[("prod-curd", 1)]),
        ];

        let offers = personalized_offers(&history, &catalog);

        let restock = offers
            .iter()
            .find(|offer| offer.title == "Restock Your Favorites")
            .expect("restock offer");
        assert_eq!(restock.discount, 5);
        assert_eq!(restock.products.len(), 1);
        assert_eq!(restock.products[0].id.as_str(), "prod-curd");
    }

    #[test]
    fn never_more_than_three_offers() {
        let catalog = Catalog::demo();
        let history = vec![
            order_of(&catalog, &[("prod-dosa-batter", 5), ("prod-sambar-powder", 1)]),
            order_of(&catalog, &[("prod-dosa-batter", 2), ("prod-sambar-powder", 1)]),
        ];

        let offers = personalized_offers(&history, &catalog);
        assert!(offers.len() <= MAX_OFFERS);
    }

    #[test]
    fn category_tie_breaks_toward_breakfast() {
        let catalog = Catalog::demo();
        let history =
            vec![order_of(&catalog, &[("prod-dosa-batter", 3), ("prod-sambar-powder", 3)])];

        let offers = personalized_offers(&history, &catalog);
        assert_eq!(offers[0].title, "South Indian Breakfast Lover");
    }

    #[test]
    fn offers_ignore_the_live_cart() {
        // Offers depend only on history and catalog.
        let catalog = Catalog::demo();
        let _cart = Cart::new();
        let offers = personalized_offers(&[], &catalog);
        assert_eq!(offers.len(), 1);
    }
}
