use serde::{Deserialize, Serialize};

use super::product::{Product, ProductId};

/// A product reference paired with a positive quantity. An item whose
/// quantity would drop to zero is removed from the cart instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> u32 {
        self.product.price * self.quantity
    }
}

/// The current basket for one session. The store owns persistence; this
/// type only enforces the quantity invariant and totals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product.id == id)
    }

    /// Add `quantity` of a product, merging with an existing line.
    /// A zero quantity is a no-op.
    pub fn add(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(existing) = self.items.iter_mut().find(|item| item.product.id == product.id) {
            existing.quantity += quantity;
        } else {
            self.items.push(CartItem { product, quantity });
        }
    }

    /// Replace a line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }
        if let Some(existing) = self.items.iter_mut().find(|item| &item.product.id == id) {
            existing.quantity = quantity;
        }
    }

    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|item| &item.product.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
