//! Health check handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub chaos_enabled: bool,
}

/// Liveness check - is the server running?
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        chaos_enabled: state.chaos.is_enabled(),
    })
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub ready: bool,
}

/// Readiness check - is the server able to take traffic?
///
/// All state is in-process, so readiness follows liveness; the endpoint
/// exists for orchestrators that probe the two separately.
pub async fn readiness_check() -> Json<ReadyResponse> {
    Json(ReadyResponse { ready: true })
}
