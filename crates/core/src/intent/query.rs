//! Free-text search phrases to structured filters.
//!
//! Parsing is total: every input yields a (possibly all-empty)
//! `SearchQuery`. "No match" is an absent field, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::Category;

/// Structured interpretation of a search phrase. Absent fields mean
/// "no constraint", not "exclude".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl SearchQuery {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.price.is_none() && self.keywords.is_none()
    }

    /// Apply the filter to one product. Absent fields impose no
    /// constraint; keywords match when any token appears in the product's
    /// name, description, or tags.
    pub fn matches(&self, product: &crate::domain::Product) -> bool {
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }

        if let Some(bounds) = &self.price {
            if bounds.max.is_some_and(|max| product.price > max) {
                return false;
            }
            if bounds.min.is_some_and(|min| product.price < min) {
                return false;
            }
        }

        if let Some(keywords) = &self.keywords {
            if !keywords.is_empty() {
                let haystack = format!(
                    "{} {} {}",
                    product.name,
                    product.description,
                    product.tags.join(" ")
                )
                .to_lowercase();
                return keywords.iter().any(|keyword| haystack.contains(keyword.as_str()));
            }
        }

        true
    }
}

static MAX_PRICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"under (\d+)|below (\d+)|less than (\d+)").expect("valid pattern"));
static MIN_PRICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"above (\d+)|over (\d+)|more than (\d+)").expect("valid pattern"));
static PRICE_PHRASES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"under \d+|below \d+|less than \d+|above \d+|over \d+|more than \d+")
        .expect("valid pattern")
});

const FILLER_PHRASES: &[&str] = &["show me", "find", "search for", "get me", "i want", "i need"];
const STOP_WORDS: &[&str] = &["items", "products", "things"];

/// Parse a free-text search phrase. Case-insensitive, pure, deterministic.
pub fn parse_query(text: &str) -> SearchQuery {
    let lower = text.to_lowercase();
    let mut query = SearchQuery::default();

    // First searchable category appearing as a substring wins; at most one
    // category is ever set.
    for category in Category::SEARCHABLE {
        if lower.contains(category.as_str()) {
            query.category = Some(category);
            break;
        }
    }

    let max = first_numeric_capture(&MAX_PRICE, &lower);
    let min = first_numeric_capture(&MIN_PRICE, &lower);
    if max.is_some() || min.is_some() {
        query.price = Some(PriceBounds { min, max });
    }

    let keywords = extract_keywords(&lower);
    if !keywords.is_empty() {
        query.keywords = Some(keywords);
    }

    query
}

/// First alternation branch that matched carries the digits.
fn first_numeric_capture(pattern: &Regex, text: &str) -> Option<u32> {
    let captures = pattern.captures(text)?;
    captures
        .iter()
        .skip(1)
        .flatten()
        .next()
        .and_then(|group| group.as_str().parse::<u32>().ok())
}

fn extract_keywords(lower: &str) -> Vec<String> {
    let mut stripped = lower.to_owned();
    for phrase in FILLER_PHRASES {
        stripped = stripped.replace(phrase, "");
    }
    let stripped = PRICE_PHRASES.replace_all(&stripped, "");

    stripped
        .split_whitespace()
        .filter(|word| word.len() > 2)
        .filter(|word| Category::SEARCHABLE.iter().all(|category| category.as_str() != *word))
        .filter(|word| !STOP_WORDS.contains(word))
        .map(str::to_owned)
        .collect()
}
