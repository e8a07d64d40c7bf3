//! Natural-Language Shopping Intent Engine.
//!
//! Single-pass, rule-based extraction of structured intents from free
//! text (typed or voice-transcribed): search filters, cart commands,
//! catalog matches, and autocomplete suggestions. No learning, no
//! cross-turn context; every function is pure and total.

mod command;
mod matcher;
mod query;
mod suggest;

pub use command::{parse_command, CommandAction, OrderCommand};
pub use matcher::match_product;
pub use query::{parse_query, PriceBounds, SearchQuery};
pub use suggest::search_suggestions;

/// Cap on autocomplete suggestions.
pub const MAX_SUGGESTIONS: usize = 5;
