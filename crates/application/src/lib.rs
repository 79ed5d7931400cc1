//! Application layer - Use cases and orchestration
//!
//! Hosts the order use cases (place/pay/ship and their compensations) on
//! top of an in-memory store. Deliberately thin: the interesting behavior
//! of this service lives in the chaos engine, not here.

pub mod error;
pub mod services;

pub use error::ApplicationError;
pub use services::OrderService;
