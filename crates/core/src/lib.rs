pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod insights;
pub mod intent;

pub use catalog::{categorize, Catalog};
pub use domain::{Cart, CartItem, Category, CustomerInfo, Order, OrderStatus, Product, ProductId};
pub use errors::DomainError;
pub use insights::{
    inventory_recommendations, personalized_offers, recommend, InventoryRecommendation, Offer,
    Priority,
};
pub use intent::{
    match_product, parse_command, parse_query, search_suggestions, CommandAction, OrderCommand,
    PriceBounds, SearchQuery,
};
