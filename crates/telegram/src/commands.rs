//! Slash-command classification for inbound bot messages.

/// A routed inbound message. Slash commands are matched first; a few
/// keyword shortcuts from the chat UI are honored as well; everything
/// else falls through to the intent engine as `Freeform`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Products,
    AddToCart { target: Option<String> },
    Cart,
    Checkout,
    Orders,
    Track { reference: Option<String> },
    Help,
    Freeform { text: String },
}

/// Classify one inbound message. Case-insensitive; mirrors the webhook's
/// routing: explicit `/` commands, then keyword fallbacks, then free text.
pub fn parse_bot_command(input: &str) -> BotCommand {
    let text = input.trim().to_lowercase();
    if text.is_empty() {
        return BotCommand::Help;
    }

    if let Some(rest) = text.strip_prefix('/') {
        let mut parts = rest.split_whitespace();
        let verb = parts.next().unwrap_or_default();
        let argument = parts.collect::<Vec<_>>().join(" ");
        return classify_slash(verb, argument);
    }

    // Keyword shortcuts the chat UI advertises.
    if text.contains("add") && text.contains("cart") {
        let target = strip_cart_phrase(&text);
        return BotCommand::AddToCart { target };
    }
    if text.contains("track") || text.contains("where is") {
        return BotCommand::Track { reference: Some(text) };
    }
    if text.contains("show") && text.contains("all") || text == "list" {
        return BotCommand::Products;
    }

    BotCommand::Freeform { text }
}

fn classify_slash(verb: &str, argument: String) -> BotCommand {
    let argument = (!argument.is_empty()).then_some(argument);
    match verb {
        "start" => BotCommand::Start,
        "products" => BotCommand::Products,
        "addtocart" => BotCommand::AddToCart { target: argument },
        "cart" => BotCommand::Cart,
        "checkout" => BotCommand::Checkout,
        "orders" => BotCommand::Orders,
        "track" => BotCommand::Track { reference: argument },
        _ => BotCommand::Help,
    }
}

/// Peel "add ... to cart"-style framing down to the product words.
fn strip_cart_phrase(text: &str) -> Option<String> {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|word| !matches!(*word, "add" | "to" | "my" | "the" | "cart" | "please"))
        .collect();
    (!words.is_empty()).then(|| words.join(" "))
}
