//! Deterministic retail heuristics: recommendations, offers, and restock
//! advice. Pull-based companions to the intent engine; all pure functions
//! over cart, catalog, and order history.

mod inventory;
mod offers;
mod recommend;

pub use inventory::{inventory_recommendations, InventoryRecommendation, Priority};
pub use offers::{personalized_offers, Offer, MAX_OFFERS};
pub use recommend::{recommend, MAX_RECOMMENDATIONS};
