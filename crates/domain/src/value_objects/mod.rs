//! Value Objects - Immutable, identity-less domain primitives

mod order_id;

pub use order_id::OrderId;
