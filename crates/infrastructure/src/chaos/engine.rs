//! Chaos engine
//!
//! One explicit object owns all process-wide mutable chaos state: the
//! active-scenario cell and the per-endpoint counter table. It is built
//! once at startup and handed to the interceptor by reference; there are no
//! implicit global singletons.
//!
//! Hot-path characteristics: the active scenario is read lock-free via
//! `ArcSwapOption`, per-endpoint counters live in a sharded `DashMap` so
//! updates to one endpoint never block updates to another, and the latency
//! sleep happens before any shared state is touched.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::config::{ChaosConfig, EndpointChaos};
use super::failure::{self, Decision, EndpointState, InjectedFailure};
use super::latency;

/// Errors surfaced to administrative callers
#[derive(Debug, Error)]
pub enum ChaosError {
    /// The named scenario is not configured
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}

/// Result of one endpoint evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaosOutcome {
    /// Latency actually applied, in milliseconds (0 if none)
    pub delay_ms: u64,
    /// Fail/pass decision
    pub decision: Decision,
}

impl ChaosOutcome {
    /// An outcome with no delay and a passing decision
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            delay_ms: 0,
            decision: Decision::Pass,
        }
    }
}

/// Statistics snapshot served by the administrative surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaosStats {
    /// Whether the engine is globally enabled
    pub enabled: bool,
    /// Currently active scenario, if any
    pub active_scenario: Option<String>,
    /// Per-endpoint runtime state, keyed by endpoint name
    pub endpoints: HashMap<String, EndpointState>,
}

/// Health summary of the chaos subsystem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaosSummary {
    /// Whether the engine is globally enabled
    pub enabled: bool,
    /// Number of configured endpoint specs
    pub endpoint_count: usize,
    /// Number of configured scenarios
    pub scenario_count: usize,
}

/// The chaos injection engine
#[derive(Debug)]
pub struct ChaosEngine {
    config: Arc<ChaosConfig>,
    active_scenario: ArcSwapOption<String>,
    states: DashMap<String, EndpointState>,
}

impl ChaosEngine {
    /// Create an engine over a validated configuration snapshot
    #[must_use]
    pub fn new(config: ChaosConfig) -> Self {
        Self {
            config: Arc::new(config),
            active_scenario: ArcSwapOption::empty(),
            states: DashMap::new(),
        }
    }

    /// Whether chaos injection is globally enabled
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Currently active scenario name, if any
    #[must_use]
    pub fn active_scenario(&self) -> Option<String> {
        self.active_scenario.load_full().map(|name| (*name).clone())
    }

    /// Activate a named scenario for the whole process.
    ///
    /// Fails with `UnknownScenario` when the name is not configured; a
    /// previously active scenario is left untouched in that case.
    pub fn activate_scenario(&self, name: &str) -> Result<(), ChaosError> {
        if !self.config.scenarios.contains_key(name) {
            return Err(ChaosError::UnknownScenario(name.to_string()));
        }
        self.active_scenario.store(Some(Arc::new(name.to_string())));
        info!(scenario = name, "chaos scenario activated");
        Ok(())
    }

    /// Deactivate any active scenario. Idempotent when none is active.
    pub fn deactivate_scenario(&self) {
        let previous = self.active_scenario.swap(None);
        if let Some(name) = previous {
            info!(scenario = %name, "chaos scenario deactivated");
        }
    }

    /// Zero the failure/success counters of every tracked endpoint.
    ///
    /// Does not touch the active scenario, and does not clear
    /// `last_failure_time` (it is a statistic, not cycle position).
    pub fn reset_runtime_state(&self) {
        for mut entry in self.states.iter_mut() {
            entry.value_mut().reset_counters();
        }
        info!("chaos runtime state reset");
    }

    /// Effective configuration after the active scenario overlay.
    ///
    /// When the engine is disabled the base configuration is returned
    /// verbatim and the merge is skipped entirely; callers must check
    /// `enabled` before consulting endpoint entries.
    #[must_use]
    pub fn effective_config(&self) -> Arc<ChaosConfig> {
        if !self.config.enabled {
            return Arc::clone(&self.config);
        }
        let Some(active) = self.active_scenario.load_full() else {
            return Arc::clone(&self.config);
        };
        let Some(scenario) = self.config.scenarios.get(active.as_str()) else {
            return Arc::clone(&self.config);
        };

        let mut merged = (*self.config).clone();
        for (name, endpoint) in &scenario.endpoints {
            merged.endpoints.insert(name.clone(), endpoint.clone());
        }
        Arc::new(merged)
    }

    /// Scenario descriptions for operator listings
    #[must_use]
    pub fn scenario_descriptions(&self) -> HashMap<String, String> {
        self.config
            .scenarios
            .iter()
            .map(|(name, scenario)| (name.clone(), scenario.description.clone()))
            .collect()
    }

    /// Statistics snapshot: enabled flag, active scenario, per-endpoint state
    #[must_use]
    pub fn statistics(&self) -> ChaosStats {
        ChaosStats {
            enabled: self.config.enabled,
            active_scenario: self.active_scenario(),
            endpoints: self
                .states
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect(),
        }
    }

    /// Health summary: enabled flag plus configured endpoint/scenario counts
    #[must_use]
    pub fn summary(&self) -> ChaosSummary {
        ChaosSummary {
            enabled: self.config.enabled,
            endpoint_count: self.config.endpoints.len(),
            scenario_count: self.config.scenarios.len(),
        }
    }

    /// Evaluate one call against one endpoint: apply latency (which may
    /// suspend the calling task), then the failure decision.
    ///
    /// Evaluation order is fixed: resolve configuration, resolve the
    /// endpoint's spec, latency, failure. The latency sleep runs before the
    /// per-endpoint entry lock is taken.
    pub async fn evaluate(&self, endpoint: &str) -> ChaosOutcome {
        let Some(spec) = self.endpoint_spec(endpoint) else {
            return ChaosOutcome::pass();
        };
        if !spec.enabled {
            return ChaosOutcome::pass();
        }

        let delay_ms = latency::inject(spec.latency.as_ref()).await;

        let decision = match spec.failure.as_ref().filter(|f| f.enabled) {
            None => Decision::Pass,
            Some(failure_config) => {
                let failed = {
                    // Entry lock scope: the counter read-modify-write is
                    // atomic per endpoint, and independent endpoints live
                    // in different shards.
                    let mut state = self.states.entry(endpoint.to_string()).or_default();
                    failure::decide(failure_config, state.value_mut())
                };
                if failed {
                    let injected = InjectedFailure::from_config(failure_config);
                    debug!(
                        endpoint,
                        kind = %injected.kind,
                        status = injected.status,
                        "injecting failure"
                    );
                    Decision::Fail(injected)
                } else {
                    Decision::Pass
                }
            },
        };

        ChaosOutcome { delay_ms, decision }
    }

    /// Resolve the chaos spec for one endpoint, honoring the active
    /// scenario overlay. `None` when the engine is disabled or the
    /// endpoint has no entry.
    fn endpoint_spec(&self, endpoint: &str) -> Option<EndpointChaos> {
        if !self.config.enabled {
            return None;
        }
        if let Some(active) = self.active_scenario.load_full() {
            if let Some(scenario) = self.config.scenarios.get(active.as_str()) {
                if let Some(spec) = scenario.endpoints.get(endpoint) {
                    return Some(spec.clone());
                }
            }
        }
        self.config.endpoints.get(endpoint).cloned()
    }
}
