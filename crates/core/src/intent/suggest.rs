//! Autocomplete suggestions for partial search input.

use crate::catalog::Catalog;
use crate::intent::MAX_SUGGESTIONS;

/// Canned example phrases offered alongside catalog-derived suggestions.
const COMMON_PATTERNS: &[&str] = &[
    "breakfast items under 200",
    "south indian spices",
    "ready to eat meals",
    "instant breakfast",
    "traditional condiments",
    "premium ghee",
    "filter coffee powder",
];

/// Collect up to five distinct suggestion strings containing the partial
/// query: product names, category labels, tag labels (hyphens replaced by
/// spaces), then canned patterns, in insertion order.
///
/// An empty query trivially matches everything; the caller is expected to
/// special-case empty input (e.g. show recent searches) before calling.
pub fn search_suggestions(partial: &str, catalog: &Catalog) -> Vec<String> {
    let needle = partial.to_lowercase();
    let mut suggestions: Vec<String> = Vec::new();

    let mut push = |candidate: String| {
        if !suggestions.contains(&candidate) {
            suggestions.push(candidate);
        }
    };

    for product in catalog.products() {
        if product.name.to_lowercase().contains(&needle) {
            push(product.name.clone());
        }
        if product.category.as_str().contains(&needle) {
            push(product.category.label());
        }
        for tag in &product.tags {
            if tag.to_lowercase().contains(&needle) {
                push(tag.replace('-', " "));
            }
        }
    }

    for pattern in COMMON_PATTERNS {
        if pattern.contains(&needle) {
            push((*pattern).to_owned());
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_more_than_five_and_never_duplicated() {
        let catalog = Catalog::demo();
        let suggestions = search_suggestions("a", &catalog);
        assert!(suggestions.len() <= 5);
        for suggestion in &suggestions {
            assert_eq!(suggestions.iter().filter(|other| *other == suggestion).count(), 1);
        }
    }

    #[test]
    fn product_names_match_by_substring() {
        let catalog = Catalog::demo();
        let suggestions = search_suggestions("coffee", &catalog);
        assert!(suggestions.contains(&"Filter Coffee Powder".to_string()));
    }

    #[test]
    fn category_labels_are_humanized() {
        let catalog = Catalog::demo();
        let suggestions = search_suggestions("ready-to", &catalog);
        assert!(suggestions.contains(&"ready to eat".to_string()));
    }

    #[test]
    fn canned_patterns_are_offered() {
        let catalog = Catalog::new(Vec::new());
        let suggestions = search_suggestions("south indian", &catalog);
        assert_eq!(suggestions, vec!["south indian spices".to_string()]);
    }

    #[test]
    fn empty_query_is_capped_at_five() {
        let catalog = Catalog::demo();
        let suggestions = search_suggestions("", &catalog);
        assert_eq!(suggestions.len(), 5);
    }
}
