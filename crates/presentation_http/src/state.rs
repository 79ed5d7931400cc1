//! Application state shared across handlers

use std::sync::Arc;

use application::OrderService;
use infrastructure::{AppConfig, ChaosEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order use cases
    pub orders: Arc<OrderService>,
    /// Chaos injection engine
    pub chaos: Arc<ChaosEngine>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Assemble the state from a loaded configuration
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let chaos = Arc::new(ChaosEngine::new(config.chaos.clone()));
        Self {
            orders: Arc::new(OrderService::new()),
            chaos,
            config: Arc::new(config),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("orders", &self.orders.len())
            .field("chaos_enabled", &self.chaos.is_enabled())
            .finish_non_exhaustive()
    }
}
