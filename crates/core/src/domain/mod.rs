pub mod cart;
pub mod order;
pub mod product;

pub use cart::{Cart, CartItem};
pub use order::{CustomerInfo, Order, OrderStatus};
pub use product::{Category, Product, ProductId};
