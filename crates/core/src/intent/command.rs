//! Free-text utterances to structured cart-mutation commands.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    AddToCart,
    Unknown,
}

/// Structured interpretation of a cart command. `Unknown` carries no
/// product or meaningful quantity; callers treat it as "no actionable
/// target".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCommand {
    pub action: CommandAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    pub quantity: u32,
}

impl OrderCommand {
    fn unknown() -> Self {
        Self { action: CommandAction::Unknown, product: None, quantity: 1 }
    }
}

static QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s*(pack|packs|piece|pieces|kg|grams?|ml|liters?)?").expect("valid pattern")
});
static PRODUCT_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:order|add|get|buy)\s+(?:\d+\s+(?:pack|packs|piece|pieces|kg|grams?|ml|liters?)?\s+(?:of\s+)?)?(.+)",
    )
    .expect("valid pattern")
});

const TRIGGER_WORDS: &[&str] = &["order", "add", "buy"];

/// Parse a free-text utterance into a cart command. Case-insensitive.
///
/// Without a trigger word (`order`, `add`, `buy`) the utterance is not a
/// cart command at all. A trigger word with no trailing product phrase is
/// demoted to `Unknown` rather than surfacing an empty target.
pub fn parse_command(text: &str) -> OrderCommand {
    let lower = text.to_lowercase();

    if !TRIGGER_WORDS.iter().any(|trigger| lower.contains(trigger)) {
        return OrderCommand::unknown();
    }

    // Quantity is a positive integer; a literal "0" in the text clamps
    // up to the default of one.
    let quantity = QUANTITY
        .captures(&lower)
        .and_then(|captures| captures.get(1))
        .and_then(|group| group.as_str().parse::<u32>().ok())
        .unwrap_or(1)
        .max(1);

    let product = PRODUCT_PHRASE
        .captures(&lower)
        .and_then(|captures| captures.get(1))
        .map(|group| group.as_str().trim().to_owned())
        .filter(|phrase| !phrase.is_empty());

    match product {
        Some(product) => {
            OrderCommand { action: CommandAction::AddToCart, product: Some(product), quantity }
        }
        None => OrderCommand::unknown(),
    }
}
