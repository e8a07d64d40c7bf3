//! Loose product-name resolution against the catalog.

use crate::catalog::Catalog;
use crate::domain::Product;

/// Resolve a free-text fragment to a catalog product.
///
/// An exact id match wins first. Otherwise the fragment matches when it
/// contains the product name or the product name contains it, both sides
/// lower-cased; the first catalog-order hit is returned. No edit-distance,
/// no scoring.
pub fn match_product<'a>(fragment: &str, catalog: &'a Catalog) -> Option<&'a Product> {
    let trimmed = fragment.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(product) = catalog.find_by_id(trimmed) {
        return Some(product);
    }

    let needle = trimmed.to_lowercase();
    catalog.products().iter().find(|product| {
        let name = product.name.to_lowercase();
        name.contains(&needle) || needle.contains(&name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_id_wins() {
        let catalog = Catalog::demo();
        let product = match_product("prod-ghee", &catalog).expect("match");
        assert_eq!(product.name, "Premium Ghee");
    }

    #[test]
    fn fragment_contained_in_name() {
        let catalog = Catalog::demo();
        let product = match_product("dosa", &catalog).expect("match");
        assert_eq!(product.name, "Dosa Batter");
    }

    #[test]
    fn name_contained_in_fragment() {
        let catalog = Catalog::demo();
        let product = match_product("one fresh dosa batter please", &catalog).expect("match");
        assert_eq!(product.name, "Dosa Batter");
    }

    #[test]
    fn first_catalog_order_match_wins() {
        let catalog = Catalog::demo();
        // "batter" appears in both Dosa Batter and Idly Batter.
        let product = match_product("batter", &catalog).expect("match");
        assert_eq!(product.name, "Dosa Batter");
    }

    #[test]
    fn empty_and_unmatched_fragments_resolve_to_none() {
        let catalog = Catalog::demo();
        assert!(match_product("", &catalog).is_none());
        assert!(match_product("   ", &catalog).is_none());
        assert!(match_product("spaceship", &catalog).is_none());
    }
}
