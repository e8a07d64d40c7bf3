//! Per-session cart and order state behind a keyed store interface.
//!
//! The intent engine stays stateless; all mutable state lives here, keyed
//! by an external session identifier (Telegram chat id, browser session).
//! `MemoryStore` is the reference backend — single-writer per logical
//! session. Production deployments implement `SessionStore` over a
//! transactional external store instead.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use voicecart_core::{Cart, Order};

/// External conversation identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store backend failure: {0}")]
    Backend(String),
}

/// Keyed get/set/append access to one session's cart and order history.
/// Absent sessions read as an empty cart and no orders.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn cart(&self, session: &SessionId) -> Result<Cart, StoreError>;

    async fn put_cart(&self, session: &SessionId, cart: Cart) -> Result<(), StoreError>;

    async fn clear_cart(&self, session: &SessionId) -> Result<(), StoreError>;

    async fn orders(&self, session: &SessionId) -> Result<Vec<Order>, StoreError>;

    async fn append_order(&self, session: &SessionId, order: Order) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default)]
struct SessionState {
    cart: Cart,
    orders: Vec<Order>,
}

/// In-process reference store. No per-entry locking: the deployment
/// guarantees a single writer per logical session.
#[derive(Clone, Default)]
pub struct MemoryStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionState>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn cart(&self, session: &SessionId) -> Result<Cart, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session).map(|state| state.cart.clone()).unwrap_or_default())
    }

    async fn put_cart(&self, session: &SessionId, cart: Cart) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.entry(session.clone()).or_default().cart = cart;
        Ok(())
    }

    async fn clear_cart(&self, session: &SessionId) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        if let Some(state) = sessions.get_mut(session) {
            state.cart.clear();
        }
        Ok(())
    }

    async fn orders(&self, session: &SessionId) -> Result<Vec<Order>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session).map(|state| state.orders.clone()).unwrap_or_default())
    }

    async fn append_order(&self, session: &SessionId, order: Order) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.entry(session.clone()).or_default().orders.push(order);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicecart_core::{Catalog, CustomerInfo};

    fn session(id: &str) -> SessionId {
        SessionId::new(id)
    }

    #[tokio::test]
    async fn absent_session_reads_as_empty() {
        let store = MemoryStore::new();
        assert!(store.cart(&session("u1")).await.unwrap().is_empty());
        assert!(store.orders(&session("u1")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn carts_are_isolated_per_session() {
        let store = MemoryStore::new();
        let catalog = Catalog::demo();
        let ghee = catalog.find_by_id("prod-ghee").unwrap().clone();

        let mut cart = Cart::new();
        cart.add(ghee, 2);
        store.put_cart(&session("u1"), cart).await.unwrap();

        assert_eq!(store.cart(&session("u1")).await.unwrap().items().len(), 1);
        assert!(store.cart(&session("u2")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn put_cart_replaces_the_previous_cart() {
        let store = MemoryStore::new();
        let catalog = Catalog::demo();

        let mut first = Cart::new();
        first.add(catalog.find_by_id("prod-ghee").unwrap().clone(), 1);
        store.put_cart(&session("u1"), first).await.unwrap();

        let mut second = Cart::new();
        second.add(catalog.find_by_id("prod-curd").unwrap().clone(), 3);
        store.put_cart(&session("u1"), second).await.unwrap();

        let cart = store.cart(&session("u1")).await.unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product.id.as_str(), "prod-curd");
    }

    #[tokio::test]
    async fn orders_append_in_placement_order() {
        let store = MemoryStore::new();
        let customer = CustomerInfo { name: "Asha".into(), contact: None, address: None };

        store
            .append_order(&session("u1"), Order::place("TG-1", Vec::new(), customer.clone()))
            .await
            .unwrap();
        store
            .append_order(&session("u1"), Order::place("TG-2", Vec::new(), customer))
            .await
            .unwrap();

        let orders = store.orders(&session("u1")).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, "TG-1");
        assert_eq!(orders[1].id, "TG-2");
    }

    #[tokio::test]
    async fn clear_cart_keeps_order_history() {
        let store = MemoryStore::new();
        let catalog = Catalog::demo();
        let customer = CustomerInfo { name: "Ravi".into(), contact: None, address: None };

        let mut cart = Cart::new();
        cart.add(catalog.find_by_id("prod-ghee").unwrap().clone(), 1);
        store.put_cart(&session("u1"), cart).await.unwrap();
        store
            .append_order(&session("u1"), Order::place("TG-9", Vec::new(), customer))
            .await
            .unwrap();

        store.clear_cart(&session("u1")).await.unwrap();

        assert!(store.cart(&session("u1")).await.unwrap().is_empty());
        assert_eq!(store.orders(&session("u1")).await.unwrap().len(), 1);
    }
}
