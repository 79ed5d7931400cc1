//! Chaos administrative surface
//!
//! Operator and test-harness control of the chaos engine: scenario
//! activation, state reset, statistics. These paths are excluded from
//! chaos injection by the interceptor.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
};
use infrastructure::{ChaosConfig, ChaosError, ChaosStats, ChaosSummary};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Acknowledgement of an administrative action
#[derive(Debug, Serialize, Deserialize)]
pub struct ChaosActionResponse {
    /// What happened
    pub status: String,
    /// Active scenario after the action, if any
    pub active_scenario: Option<String>,
}

/// Effective configuration after the active scenario overlay
pub async fn get_config(State(state): State<AppState>) -> Json<ChaosConfig> {
    Json((*state.chaos.effective_config()).clone())
}

/// List configured scenarios with their descriptions
pub async fn list_scenarios(State(state): State<AppState>) -> Json<HashMap<String, String>> {
    Json(state.chaos.scenario_descriptions())
}

/// Activate a named scenario for the whole process
#[instrument(skip(state))]
pub async fn activate_scenario(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ChaosActionResponse>, ApiError> {
    state.chaos.activate_scenario(&name).map_err(|e| match e {
        ChaosError::UnknownScenario(_) => ApiError::BadRequest(e.to_string()),
    })?;
    Ok(Json(ChaosActionResponse {
        status: "activated".to_string(),
        active_scenario: state.chaos.active_scenario(),
    }))
}

/// Deactivate any active scenario; idempotent
#[instrument(skip(state))]
pub async fn deactivate_scenario(State(state): State<AppState>) -> Json<ChaosActionResponse> {
    state.chaos.deactivate_scenario();
    Json(ChaosActionResponse {
        status: "deactivated".to_string(),
        active_scenario: None,
    })
}

/// Zero all per-endpoint runtime counters
#[instrument(skip(state))]
pub async fn reset_state(State(state): State<AppState>) -> Json<ChaosActionResponse> {
    state.chaos.reset_runtime_state();
    Json(ChaosActionResponse {
        status: "reset".to_string(),
        active_scenario: state.chaos.active_scenario(),
    })
}

/// Runtime statistics per endpoint
pub async fn get_stats(State(state): State<AppState>) -> Json<ChaosStats> {
    Json(state.chaos.statistics())
}

/// Chaos subsystem health summary
pub async fn chaos_health(State(state): State<AppState>) -> Json<ChaosSummary> {
    Json(state.chaos.summary())
}
