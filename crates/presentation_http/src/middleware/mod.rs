//! HTTP middleware components
//!
//! The chaos interceptor sits in front of the order handlers and feeds
//! every business request through the chaos engine.

pub mod chaos;

pub use chaos::{ChaosInterceptor, ChaosInterceptorLayer, SCENARIO_OVERRIDE_HEADER, classify};
