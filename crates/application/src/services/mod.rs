//! Application services

mod order_service;

pub use order_service::OrderService;
