//! Domain entities

mod order;

pub use order::{Order, OrderStatus};
