//! Inbound update routing: slash commands against the session store,
//! free text through the intent engine.

use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

use voicecart_core::{
    match_product, parse_command, parse_query, Cart, Catalog, CommandAction, CustomerInfo, Order,
    Product,
};
use voicecart_store::{SessionId, SessionStore, StoreError};

use crate::commands::{parse_bot_command, BotCommand};
use crate::format::{self, Reply};
use crate::update::{Message, Update};

static ORDER_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:track|#)\s*([a-zA-Z]+-\d+)").expect("valid pattern"));
static BARE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").expect("valid pattern"));

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Stateless router over the catalog and a session store. Safe to share
/// across concurrent webhook deliveries; all per-user state lives in the
/// store.
pub struct UpdateHandler<S> {
    catalog: Arc<Catalog>,
    store: Arc<S>,
}

impl<S: SessionStore> UpdateHandler<S> {
    pub fn new(catalog: Arc<Catalog>, store: Arc<S>) -> Self {
        Self { catalog, store }
    }

    /// Route one update to a reply. Updates without a text message are
    /// ignored (`None`).
    pub async fn handle(&self, update: &Update) -> Result<Option<Reply>, HandlerError> {
        let Some(message) = &update.message else {
            return Ok(None);
        };
        let Some(text) = message.text.as_deref() else {
            return Ok(None);
        };

        let session = SessionId::new(
            message.from.as_ref().map_or_else(|| message.chat.id, |user| user.id).to_string(),
        );

        let command = parse_bot_command(text);
        debug!(session = %session, ?command, "routing inbound message");

        let reply = match command {
            BotCommand::Start => Reply::text(format::welcome()),
            BotCommand::Help => Reply::text(format::help()),
            BotCommand::Products => self.list_products(),
            BotCommand::AddToCart { target } => self.add_to_cart(&session, target, 1).await?,
            BotCommand::Cart => {
                Reply::text(format::cart_summary(&self.store.cart(&session).await?))
            }
            BotCommand::Checkout => self.checkout(&session, message).await?,
            BotCommand::Orders => Reply::text(format::order_list(&self.store.orders(&session).await?)),
            BotCommand::Track { reference } => self.track(&session, reference).await?,
            BotCommand::Freeform { text } => self.freeform(&session, &text).await?,
        };

        Ok(Some(reply))
    }

    fn list_products(&self) -> Reply {
        let products: Vec<&Product> = self.catalog.products().iter().collect();
        Reply::with_keyboard(
            format!("🛍️ <b>Available Products:</b>\n\n{}", format::product_list(&products)),
            format::product_keyboard(&products),
        )
    }

    async fn add_to_cart(
        &self,
        session: &SessionId,
        target: Option<String>,
        quantity: u32,
    ) -> Result<Reply, HandlerError> {
        let Some(target) = target.filter(|target| !target.trim().is_empty()) else {
            return Ok(Reply::text(
                "Please specify a product. Use /products to see available items.",
            ));
        };

        let Some(product) = match_product(&target, &self.catalog) else {
            return Ok(Reply::text("Product not found. Use /products to see available items."));
        };

        if !product.in_stock {
            return Ok(Reply::text(format::out_of_stock(product)));
        }

        let mut cart = self.store.cart(session).await?;
        cart.add(product.clone(), quantity);
        self.store.put_cart(session, cart).await?;

        info!(
            event_name = "bot.cart.item_added",
            session = %session,
            product_id = %product.id,
            quantity,
            "added product to session cart"
        );
        Ok(Reply::text(format::added_to_cart(product)))
    }

    async fn checkout(&self, session: &SessionId, message: &Message) -> Result<Reply, HandlerError> {
        let cart = self.store.cart(session).await?;
        if cart.is_empty() {
            return Ok(Reply::text(
                "🛒 Your cart is empty. Add some items first using /products",
            ));
        }

        let customer = CustomerInfo {
            name: message
                .from
                .as_ref()
                .map_or_else(|| "Telegram User".to_owned(), |user| user.first_name.clone()),
            contact: message.from.as_ref().and_then(|user| user.username.clone()),
            address: None,
        };

        let order = Order::place(
            format!("TG-{}", Utc::now().timestamp_millis()),
            cart.items().to_vec(),
            customer,
        );
        let receipt = format::order_receipt(&order);

        info!(
            event_name = "bot.order.placed",
            session = %session,
            order_id = %order.id,
            total = order.total,
            "order placed from telegram cart"
        );

        self.store.append_order(session, order).await?;
        self.store.put_cart(session, Cart::new()).await?;

        Ok(Reply::text(receipt))
    }

    async fn track(
        &self,
        session: &SessionId,
        reference: Option<String>,
    ) -> Result<Reply, HandlerError> {
        let Some(order_id) = reference.as_deref().and_then(extract_order_id) else {
            return Ok(Reply::text(
                "Please provide an order ID. Example: /track TG-1234567890",
            ));
        };

        let orders = self.store.orders(session).await?;
        match orders.iter().find(|order| order.id.eq_ignore_ascii_case(&order_id)) {
            Some(order) => Ok(Reply::text(format::order_tracking(order))),
            None => Ok(Reply::text(format!(
                "❌ Order {order_id} not found. Use /orders to see your order history."
            ))),
        }
    }

    async fn freeform(&self, session: &SessionId, text: &str) -> Result<Reply, HandlerError> {
        let command = parse_command(text);
        if command.action == CommandAction::AddToCart {
            // parse_command only reports AddToCart with a product phrase.
            let target = command.product.unwrap_or_default();
            return self.add_to_cart(session, Some(target), command.quantity).await;
        }

        let query = parse_query(text);
        if query.is_empty() {
            return Ok(Reply::text(format::not_understood()));
        }

        let matches: Vec<&Product> =
            self.catalog.products().iter().filter(|product| query.matches(product)).collect();
        if matches.is_empty() {
            return Ok(Reply::text(
                "😕 No products matched that search. Use /products to browse everything.",
            ));
        }

        let heading = match query.category {
            Some(category) => format!("🔎 <b>Matching {}:</b>", category.label()),
            None => "🔎 <b>Matching products:</b>".to_owned(),
        };
        Ok(Reply::with_keyboard(
            format!("{heading}\n\n{}", format::product_list(&matches)),
            format::product_keyboard(&matches),
        ))
    }
}

/// Pull an order reference out of free text: an explicit `TG-123` style
/// token (after "track" or "#") or a bare numeral to be prefixed.
fn extract_order_id(reference: &str) -> Option<String> {
    if let Some(captures) = ORDER_REFERENCE.captures(reference) {
        return Some(captures[1].to_uppercase());
    }
    if let Some(token) = reference.split_whitespace().find(|token| {
        token.to_uppercase().starts_with("TG-")
    }) {
        return Some(token.to_uppercase());
    }
    BARE_NUMBER
        .captures(reference)
        .map(|captures| format!("TG-{}", &captures[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::{Chat, User};
    use voicecart_store::MemoryStore;

    fn handler() -> UpdateHandler<MemoryStore> {
        UpdateHandler::new(Arc::new(Catalog::demo()), Arc::new(MemoryStore::new()))
    }

    fn update_with(text: &str) -> Update {
        Update {
            update_id: 1,
            message: Some(Message {
                message_id: 1,
                from: Some(User { id: 42, first_name: "Asha".into(), username: None }),
                chat: Chat { id: 42 },
                text: Some(text.to_owned()),
            }),
        }
    }

    async fn reply_text(handler: &UpdateHandler<MemoryStore>, text: &str) -> String {
        handler
            .handle(&update_with(text))
            .await
            .expect("handle")
            .expect("reply")
            .text
    }

    #[tokio::test]
    async fn updates_without_messages_are_ignored() {
        let handler = handler();
        let update = Update { update_id: 1, message: None };
        assert!(handler.handle(&update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn start_sends_the_welcome() {
        let handler = handler();
        assert!(reply_text(&handler, "/start").await.contains("Welcome to VoiceCart Bot"));
    }

    #[tokio::test]
    async fn add_view_and_checkout_round_trip() {
        let handler = handler();

        let added = reply_text(&handler, "/addtocart dosa batter").await;
        assert!(added.contains("Added <b>Dosa Batter</b>"));

        let cart = reply_text(&handler, "/cart").await;
        assert!(cart.contains("Dosa Batter"));
        assert!(cart.contains("Total: ₹80"));

        let receipt = reply_text(&handler, "/checkout").await;
        assert!(receipt.contains("Order Placed Successfully"));

        let emptied = reply_text(&handler, "/cart").await;
        assert!(emptied.contains("cart is empty"));

        let orders = reply_text(&handler, "/orders").await;
        assert!(orders.contains("TG-"));
    }

    #[tokio::test]
    async fn checkout_with_empty_cart_is_refused() {
        let handler = handler();
        let reply = reply_text(&handler, "/checkout").await;
        assert!(reply.contains("cart is empty"));
    }

    #[tokio::test]
    async fn out_of_stock_products_cannot_be_added() {
        let handler = handler();
        let reply = reply_text(&handler, "/addtocart tomato chutney").await;
        assert!(reply.contains("out of stock"));
    }

    #[tokio::test]
    async fn freeform_order_command_adds_with_quantity() {
        let handler = handler();

        let reply = reply_text(&handler, "order 2 packs of dosa batter").await;
        assert!(reply.contains("Added <b>Dosa Batter</b>"));

        let cart = reply_text(&handler, "/cart").await;
        assert!(cart.contains("Qty: 2"));
    }

    #[tokio::test]
    async fn freeform_search_lists_matching_category() {
        let handler = handler();
        let reply = reply_text(&handler, "show me breakfast items").await;
        assert!(reply.contains("Matching breakfast"));
        assert!(reply.contains("Dosa Batter"));
        assert!(!reply.contains("Premium Ghee"));
    }

    #[tokio::test]
    async fn unintelligible_text_gets_the_fallback() {
        let handler = handler();
        let reply = reply_text(&handler, "hm ok").await;
        assert!(reply.contains("didn't understand"));
    }

    #[tokio::test]
    async fn tracking_finds_a_placed_order() {
        let handler = handler();
        reply_text(&handler, "/addtocart ghee").await;
        let receipt = reply_text(&handler, "/checkout").await;

        let order_id = receipt
            .split("<code>")
            .nth(1)
            .and_then(|rest| rest.split("</code>").next())
            .expect("order id in receipt")
            .to_owned();

        let tracked = reply_text(&handler, &format!("/track {order_id}")).await;
        assert!(tracked.contains("Order Tracking"));
        assert!(tracked.contains(&order_id));
    }

    #[tokio::test]
    async fn tracking_unknown_order_reports_not_found() {
        let handler = handler();
        let reply = reply_text(&handler, "/track TG-000").await;
        assert!(reply.contains("not found"));
    }

    #[tokio::test]
    async fn sessions_do_not_share_carts() {
        let catalog = Arc::new(Catalog::demo());
        let store = Arc::new(MemoryStore::new());
        let handler = UpdateHandler::new(catalog, store);

        let mut update = update_with("/addtocart ghee");
        handler.handle(&update).await.unwrap();

        update = update_with("/cart");
        if let Some(message) = update.message.as_mut() {
            message.from = Some(User { id: 99, first_name: "Ravi".into(), username: None });
            message.chat = Chat { id: 99 };
        }
        let reply = handler.handle(&update).await.unwrap().unwrap();
        assert!(reply.text.contains("cart is empty"));
    }

    #[test]
    fn order_reference_extraction_variants() {
        assert_eq!(extract_order_id("track tg-123").as_deref(), Some("TG-123"));
        assert_eq!(extract_order_id("#123").as_deref(), Some("TG-123"));
        assert_eq!(extract_order_id("where is my order 456").as_deref(), Some("TG-456"));
        assert_eq!(extract_order_id("tg-789").as_deref(), Some("TG-789"));
        assert_eq!(extract_order_id("no reference here").as_deref(), None);
    }
}
