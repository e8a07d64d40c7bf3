//! HTML reply builders for the bot. Telegram's `parse_mode: HTML`
//! understands a small markup subset (`<b>`, `<i>`, `<code>`).

use serde::Serialize;

use voicecart_core::{Cart, Order, Product};

/// Listed products per reply before the "and N more" tail.
const PRODUCT_LIST_LIMIT: usize = 10;

/// Inline keyboard buttons offered under a product list.
const KEYBOARD_LIMIT: usize = 3;

/// Most recent orders shown by /orders.
const ORDER_LIST_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InlineKeyboard {
    pub inline_keyboard: Vec<Vec<InlineButton>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

/// A fully built reply: HTML text plus an optional inline keyboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboard>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), keyboard: None }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: InlineKeyboard) -> Self {
        Self { text: text.into(), keyboard: Some(keyboard) }
    }
}

/// One "Add <name>" button per product, capped.
pub fn product_keyboard(products: &[&Product]) -> InlineKeyboard {
    let rows = products
        .iter()
        .take(KEYBOARD_LIMIT)
        .map(|product| {
            vec![InlineButton {
                text: format!("Add {} - ₹{}", product.name, product.price),
                callback_data: format!("add_{}", product.id),
            }]
        })
        .collect();
    InlineKeyboard { inline_keyboard: rows }
}

pub fn product_list(products: &[&Product]) -> String {
    let listed = products
        .iter()
        .take(PRODUCT_LIST_LIMIT)
        .enumerate()
        .map(|(index, product)| {
            let status = if product.in_stock { "✅" } else { "❌" };
            format!(
                "{}. <b>{}</b> - ₹{} {status}\n   <i>{}</i>",
                index + 1,
                product.name,
                product.price,
                product.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    if products.len() > PRODUCT_LIST_LIMIT {
        format!("{listed}\n\n... and {} more products", products.len() - PRODUCT_LIST_LIMIT)
    } else {
        listed
    }
}

pub fn welcome() -> String {
    "🛒 <b>Welcome to VoiceCart Bot!</b>\n\n\
     I can help you shop for South Indian groceries. Commands:\n\n\
     🔍 /products - View all available products\n\
     🛍️ /addtocart [product] - Add an item to your cart\n\
     🛒 /cart - View your current cart\n\
     💳 /checkout - Place your order\n\
     📦 /orders - View your order history\n\
     📍 /track [order_id] - Track a specific order\n\
     ❓ /help - Show this help message\n\n\
     You can also just type what you're looking for, like:\n\
     • \"show me breakfast items\"\n\
     • \"add dosa batter to cart\"\n\
     • \"where is my order #123\"\n\n\
     Let's start shopping! 🎉"
        .to_owned()
}

pub fn help() -> String {
    "❓ <b>VoiceCart Bot Help</b>\n\n\
     <b>Available Commands:</b>\n\
     🔍 /products - View all products\n\
     🛍️ /addtocart [product] - Add item to cart\n\
     🛒 /cart - View your cart\n\
     💳 /checkout - Place order\n\
     📦 /orders - Your order history\n\
     📍 /track [order_id] - Track order\n\n\
     <b>Natural Language:</b>\n\
     • \"show me breakfast items\"\n\
     • \"order 2 packs of dosa batter\"\n\
     • \"where is my order\"\n\n\
     Need more help? Just ask! 😊"
        .to_owned()
}

pub fn not_understood() -> String {
    "🤔 I didn't understand that. Try:\n\n\
     • /products - to see all items\n\
     • /help - for all commands\n\
     • Or just tell me what you're looking for!"
        .to_owned()
}

pub fn cart_summary(cart: &Cart) -> String {
    if cart.is_empty() {
        return "🛒 Your cart is empty. Use /products to browse items.".to_owned();
    }

    let lines = cart
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            format!(
                "{}. <b>{}</b>\n   Qty: {} × ₹{} = ₹{}",
                index + 1,
                item.product.name,
                item.quantity,
                item.product.price,
                item.line_total()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "🛒 <b>Your Cart:</b>\n\n{lines}\n\n<b>Total: ₹{}</b>\n\nUse /checkout to place your order!",
        cart.total()
    )
}

pub fn added_to_cart(product: &Product) -> String {
    format!(
        "✅ Added <b>{}</b> to your cart!\n\nPrice: ₹{}\nUse /cart to view your cart or /checkout to place order.",
        product.name, product.price
    )
}

pub fn out_of_stock(product: &Product) -> String {
    format!("Sorry, <b>{}</b> is currently out of stock. ❌", product.name)
}

pub fn order_receipt(order: &Order) -> String {
    format!(
        "🎉 <b>Order Placed Successfully!</b>\n\n\
         📦 Order ID: <code>{}</code>\n\
         💰 Total: ₹{}\n\
         📅 Date: {}\n\n\
         Your order is being processed. You'll receive updates on the status.\n\n\
         Use /track {} to track your order anytime!",
        order.id,
        order.total,
        order.created_at.format("%Y-%m-%d"),
        order.id
    )
}

pub fn order_list(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "📦 You haven't placed any orders yet. Use /products to start shopping!"
            .to_owned();
    }

    let recent = orders.iter().rev().take(ORDER_LIST_LIMIT).rev();
    let lines = recent
        .map(|order| {
            format!(
                "{} <b>{}</b>\n   Status: {}\n   Total: ₹{}\n   Date: {}",
                order.status.emoji(),
                order.id,
                order.status.as_str(),
                order.total,
                order.created_at.format("%Y-%m-%d")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "📦 <b>Your Recent Orders:</b>\n\n{lines}\n\nUse /track [order_id] to get detailed status."
    )
}

pub fn order_tracking(order: &Order) -> String {
    format!(
        "📦 <b>Order Tracking</b>\n\n\
         🆔 Order ID: <code>{}</code>\n\
         {} Status: <b>{}</b>\n\
         💰 Total: ₹{}\n\
         📅 Order Date: {}\n\n\
         {}",
        order.id,
        order.status.emoji(),
        order.status.as_str().to_uppercase(),
        order.total,
        order.created_at.format("%Y-%m-%d"),
        order.status.narration()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicecart_core::{Catalog, CustomerInfo};

    #[test]
    fn product_list_caps_at_ten_with_a_tail() {
        let catalog = Catalog::demo();
        let products: Vec<&Product> = catalog.products().iter().collect();
        let text = product_list(&products);

        assert!(text.contains("... and 4 more products"));
        assert!(!text.contains("Set Curd"), "items past the cap are not listed");
    }

    #[test]
    fn keyboard_offers_at_most_three_buttons() {
        let catalog = Catalog::demo();
        let products: Vec<&Product> = catalog.products().iter().collect();
        let keyboard = product_keyboard(&products);

        assert_eq!(keyboard.inline_keyboard.len(), 3);
        assert_eq!(keyboard.inline_keyboard[0][0].callback_data, "add_prod-dosa-batter");
    }

    #[test]
    fn empty_cart_summary_points_at_products() {
        assert!(cart_summary(&Cart::new()).contains("/products"));
    }

    #[test]
    fn cart_summary_totals_lines() {
        let catalog = Catalog::demo();
        let mut cart = Cart::new();
        cart.add(catalog.find_by_id("prod-ghee").unwrap().clone(), 2);

        let text = cart_summary(&cart);
        assert!(text.contains("Qty: 2 × ₹250 = ₹500"));
        assert!(text.contains("<b>Total: ₹500</b>"));
    }

    #[test]
    fn order_list_shows_only_the_last_five() {
        let customer = CustomerInfo { name: "Asha".into(), contact: None, address: None };
        let orders: Vec<Order> = (0..7)
            .map(|index| Order::place(format!("TG-{index}"), Vec::new(), customer.clone()))
            .collect();

        let text = order_list(&orders);
        assert!(!text.contains("<b>TG-0</b>"));
        assert!(!text.contains("<b>TG-1</b>"));
        assert!(text.contains("<b>TG-2</b>"));
        assert!(text.contains("<b>TG-6</b>"));
    }

    #[test]
    fn tracking_includes_status_narration() {
        let customer = CustomerInfo { name: "Asha".into(), contact: None, address: None };
        let order = Order::place("TG-77", Vec::new(), customer);

        let text = order_tracking(&order);
        assert!(text.contains("RECEIVED"));
        assert!(text.contains("received and is being prepared"));
    }
}
