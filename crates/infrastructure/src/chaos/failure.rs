//! Failure pattern state machine
//!
//! Per-endpoint fail/pass decision engine. Two modes, selected by
//! `consecutive_failures`:
//!
//! - probabilistic: an independent Bernoulli trial per call; counters are
//!   bookkeeping only and never feed back into the trial
//! - deterministic cycle: `consecutive_failures` fails, then
//!   `consecutive_successes` passes, repeating; with zero successes the
//!   cycle closes with a single neutral pass instead
//!
//! `decide` performs the read-modify-write on one endpoint's state and is
//! called while the engine holds that endpoint's map entry, which makes the
//! update atomic per key without serializing independent endpoints.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{FailureConfig, FailureKind};

/// Mutable per-endpoint runtime state, created lazily on first evaluation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointState {
    /// Failures emitted so far (cycle position in deterministic mode)
    pub failure_count: u64,
    /// Passes emitted in the current success phase
    pub success_count: u64,
    /// When this endpoint last emitted a failure
    pub last_failure_time: Option<DateTime<Utc>>,
}

impl EndpointState {
    /// Zero the counters. `last_failure_time` is intentionally left as-is;
    /// it is a statistic, not part of the cycle position.
    pub fn reset_counters(&mut self) {
        self.failure_count = 0;
        self.success_count = 0;
    }
}

/// Outcome of one endpoint evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the request proceed to business logic
    Pass,
    /// Short-circuit with this synthetic failure
    Fail(InjectedFailure),
}

impl Decision {
    /// Whether this decision is a failure
    #[must_use]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

/// Payload of a failing decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectedFailure {
    /// Resolved failure kind (never `Random`)
    pub kind: FailureKind,
    /// HTTP status to report
    pub status: u16,
    /// Human-readable message
    pub message: String,
}

impl InjectedFailure {
    /// Build the failure payload for one failing decision.
    ///
    /// `Random` is resolved here, exactly once per decision, before the
    /// status table is consulted.
    #[must_use]
    pub fn from_config(config: &FailureConfig) -> Self {
        let kind = resolve_kind(config.error_kind);
        let status = config.http_status.unwrap_or_else(|| kind.default_status());
        let message = config
            .error_message
            .clone()
            .unwrap_or_else(|| format!("Injected {kind} failure"));
        Self {
            kind,
            status,
            message,
        }
    }
}

/// Resolve `Random` to a concrete kind with a single uniform draw
fn resolve_kind(kind: FailureKind) -> FailureKind {
    if kind == FailureKind::Random {
        let index = rand::rng().random_range(0..FailureKind::CONCRETE.len());
        FailureKind::CONCRETE[index]
    } else {
        kind
    }
}

/// Decide fail (true) or pass (false) for one call against one endpoint.
///
/// Must run under the per-endpoint entry lock so the read-modify-write on
/// `state` is atomic.
pub fn decide(config: &FailureConfig, state: &mut EndpointState) -> bool {
    if config.consecutive_failures == 0 {
        return decide_probabilistic(config.failure_rate, state);
    }
    decide_cycle(config, state)
}

fn decide_probabilistic(failure_rate: f64, state: &mut EndpointState) -> bool {
    // Extremes short-circuit so out-of-range rates degrade gracefully.
    let fail = if failure_rate <= 0.0 {
        false
    } else if failure_rate >= 1.0 {
        true
    } else {
        rand::rng().random::<f64>() < failure_rate
    };

    if fail {
        state.failure_count += 1;
        state.last_failure_time = Some(Utc::now());
    }
    fail
}

fn decide_cycle(config: &FailureConfig, state: &mut EndpointState) -> bool {
    let fail_threshold = u64::from(config.consecutive_failures);
    if state.failure_count < fail_threshold {
        state.failure_count += 1;
        state.success_count = 0;
        state.last_failure_time = Some(Utc::now());
        return true;
    }

    let success_threshold = u64::from(config.consecutive_successes);
    if success_threshold == 0 {
        // Close the cycle with one neutral pass; the next call re-enters
        // the fail phase.
        state.reset_counters();
        return false;
    }

    state.success_count += 1;
    if state.success_count >= success_threshold {
        // The next call again satisfies failure_count < threshold and
        // fails immediately, giving a net cycle length of
        // consecutive_failures + consecutive_successes.
        state.reset_counters();
    }
    false
}
