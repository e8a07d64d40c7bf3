//! Restock advice derived from catalog, order history, and stock levels.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::Order;

/// Restock urgency tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecommendation {
    pub product_id: String,
    pub product_name: String,
    pub current_stock: u32,
    pub recommended_stock: u32,
    pub priority: Priority,
    pub reason: &'static str,
}

const REASON_LOW_STOCK: &str = "Low stock - risk of stockout";
const REASON_NO_DEMAND: &str = "No recent demand";
const REASON_HIGH_DEMAND: &str = "High demand product";
const REASON_BASELINE: &str = "Based on historical demand";

/// One recommendation per catalog product, sorted high priority first
/// (stable within a tier, preserving catalog order).
///
/// Branch precedence is fixed: low stock shadows high demand even when
/// both hold; "no demand" is only reachable when stock is not low
/// relative to the (zero) average.
pub fn inventory_recommendations(
    catalog: &Catalog,
    history: &[Order],
    current_stock: &HashMap<String, u32>,
) -> Vec<InventoryRecommendation> {
    let mut demand_by_product: HashMap<&str, u32> = HashMap::new();
    for order in history {
        for item in &order.items {
            *demand_by_product.entry(item.product.id.as_str()).or_insert(0) += item.quantity;
        }
    }

    let order_count = history.len() as u32;
    let mut recommendations: Vec<InventoryRecommendation> = catalog
        .products()
        .iter()
        .map(|product| {
            let demand = demand_by_product.get(product.id.as_str()).copied().unwrap_or(0);
            let stock = current_stock.get(product.id.as_str()).copied().unwrap_or(0);
            let avg_demand_per_order = f64::from(demand) / f64::from(order_count.max(1));

            let mut recommended_stock = (avg_demand_per_order * 10.0).ceil() as u32;
            let mut priority = Priority::Medium;
            let mut reason = REASON_BASELINE;

            if f64::from(stock) < avg_demand_per_order * 2.0 {
                priority = Priority::High;
                reason = REASON_LOW_STOCK;
                recommended_stock =
                    recommended_stock.max((avg_demand_per_order * 15.0).ceil() as u32);
            } else if demand == 0 {
                priority = Priority::Low;
                reason = REASON_NO_DEMAND;
                recommended_stock = recommended_stock.max(5);
            } else if f64::from(demand) > f64::from(order_count) * 0.5 {
                priority = Priority::High;
                reason = REASON_HIGH_DEMAND;
                recommended_stock = (avg_demand_per_order * 20.0).ceil() as u32;
            }

            InventoryRecommendation {
                product_id: product.id.as_str().to_owned(),
                product_name: product.name.clone(),
                current_stock: stock,
                recommended_stock,
                priority,
                reason,
            }
        })
        .collect();

    recommendations.sort_by_key(|recommendation| recommendation.priority);
    recommendations
}
