use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::CartItem;

/// Delivery lifecycle. Progression is monotonic; there is no transition
/// back from a later stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Received,
    Processing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::Processing => "processing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Next stage, or the current one if the order is already delivered.
    pub fn advance(self) -> OrderStatus {
        match self {
            OrderStatus::Received => OrderStatus::Processing,
            OrderStatus::Processing => OrderStatus::OutForDelivery,
            OrderStatus::OutForDelivery | OrderStatus::Delivered => OrderStatus::Delivered,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            OrderStatus::Received => "📥",
            OrderStatus::Processing => "⚙️",
            OrderStatus::OutForDelivery => "🚚",
            OrderStatus::Delivered => "✅",
        }
    }

    pub fn narration(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Your order has been received and is being prepared.",
            OrderStatus::Processing => "Your order is currently being processed.",
            OrderStatus::OutForDelivery => "Great news! Your order is out for delivery.",
            OrderStatus::Delivered => "Your order has been delivered successfully!",
        }
    }
}

/// Buyer details captured at checkout. Opaque to the heuristics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub contact: Option<String>,
    pub address: Option<String>,
}

/// A placed order. Items are snapshots copied at checkout time, not live
/// cart references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub items: Vec<CartItem>,
    pub total: u32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub customer: CustomerInfo,
}

impl Order {
    /// Snapshot the given items into a freshly received order.
    pub fn place(id: impl Into<String>, items: Vec<CartItem>, customer: CustomerInfo) -> Self {
        let total = items.iter().map(CartItem::line_total).sum();
        Self {
            id: id.into(),
            items,
            total,
            status: OrderStatus::Received,
            created_at: Utc::now(),
            customer,
        }
    }
}
