//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, middleware::ChaosInterceptorLayer, state::AppState};

/// Create the main router with all routes and the chaos interceptor
pub fn create_router(state: AppState) -> Router {
    let chaos_layer = ChaosInterceptorLayer::new(std::sync::Arc::clone(&state.chaos));

    Router::new()
        // Health endpoints (excluded from chaos)
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Order API (v1) - the chaos targets
        .route("/v1/orders", post(handlers::orders::place_order))
        .route("/v1/orders/{id}", get(handlers::orders::get_order))
        .route("/v1/orders/{id}/payment", post(handlers::orders::pay_order))
        .route("/v1/orders/{id}/ship", post(handlers::orders::ship_order))
        .route(
            "/v1/orders/{id}/rollback-place",
            post(handlers::orders::rollback_place),
        )
        .route(
            "/v1/orders/{id}/rollback-payment",
            post(handlers::orders::rollback_payment),
        )
        .route(
            "/v1/orders/{id}/rollback-ship",
            post(handlers::orders::rollback_ship),
        )
        // Chaos administrative surface (excluded from chaos)
        .route("/v1/chaos/config", get(handlers::chaos_admin::get_config))
        .route(
            "/v1/chaos/scenarios",
            get(handlers::chaos_admin::list_scenarios),
        )
        .route(
            "/v1/chaos/scenarios/{name}/activate",
            post(handlers::chaos_admin::activate_scenario),
        )
        .route(
            "/v1/chaos/deactivate",
            post(handlers::chaos_admin::deactivate_scenario),
        )
        .route("/v1/chaos/reset", post(handlers::chaos_admin::reset_state))
        .route("/v1/chaos/stats", get(handlers::chaos_admin::get_stats))
        .route("/v1/chaos/health", get(handlers::chaos_admin::chaos_health))
        // Chaos evaluation happens before any handler runs
        .layer(chaos_layer)
        // Attach state
        .with_state(state)
}
