//! ChaosCart HTTP presentation layer
//!
//! This crate provides the HTTP API for the demo order service: the order
//! endpoints, the chaos administrative surface, and the interceptor that
//! feeds every business request through the chaos engine.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{ChaosInterceptor, ChaosInterceptorLayer, SCENARIO_OVERRIDE_HEADER};
pub use routes::create_router;
pub use state::AppState;
