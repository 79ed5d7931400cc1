//! Chaos configuration model
//!
//! Deserialized once at startup and treated as immutable afterwards.
//! Scenario overrides replace same-named endpoint entries wholesale; there
//! is no field-level merging.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shared default for boolean `true` fields across config structs
const fn default_true() -> bool {
    true
}

/// Errors raised by eager configuration validation
#[derive(Debug, Error)]
pub enum ChaosConfigError {
    /// A probability or rate is outside the closed unit interval
    #[error("{path}: value {value} is outside [0, 1]")]
    RateOutOfRange { path: String, value: f64 },
}

/// Kind of synthetic failure to inject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// Simulated request timeout (408)
    Timeout,
    /// Generic server error (500)
    ServerError,
    /// Service unavailable (503)
    ServiceUnavailable,
    /// Malformed request rejection (400)
    BadRequest,
    /// State conflict (409)
    Conflict,
    /// Rate limiting (429)
    RateLimit,
    /// Network-level failure surfaced as 503
    NetworkError,
    /// Resolved to one of the other kinds, uniformly, once per decision
    Random,
}

impl FailureKind {
    /// The concrete kinds `Random` can resolve to
    pub const CONCRETE: [Self; 7] = [
        Self::Timeout,
        Self::ServerError,
        Self::ServiceUnavailable,
        Self::BadRequest,
        Self::Conflict,
        Self::RateLimit,
        Self::NetworkError,
    ];

    /// Default HTTP status for this kind
    ///
    /// Total over all variants so the table stays side-effect-free;
    /// `Random` is expected to be resolved before this is consulted and
    /// falls back to 500 if it is not.
    #[must_use]
    pub const fn default_status(self) -> u16 {
        match self {
            Self::Timeout => 408,
            Self::ServerError | Self::Random => 500,
            Self::ServiceUnavailable | Self::NetworkError => 503,
            Self::BadRequest => 400,
            Self::Conflict => 409,
            Self::RateLimit => 429,
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ServerError => "server error",
            Self::ServiceUnavailable => "service unavailable",
            Self::BadRequest => "bad request",
            Self::Conflict => "conflict",
            Self::RateLimit => "rate limit",
            Self::NetworkError => "network error",
            Self::Random => "random",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Artificial latency settings for one endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Whether latency injection is active
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Lower delay bound in milliseconds
    #[serde(default)]
    pub min_delay_ms: u64,

    /// Upper delay bound in milliseconds (exclusive when above the minimum)
    #[serde(default)]
    pub max_delay_ms: u64,

    /// Constant delay taking priority over the range when present
    #[serde(default)]
    pub fixed_delay_ms: Option<u64>,

    /// Probability in [0, 1] that a delay is applied at all
    #[serde(default = "default_probability")]
    pub probability: f64,
}

const fn default_probability() -> f64 {
    1.0
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_delay_ms: 0,
            max_delay_ms: 0,
            fixed_delay_ms: None,
            probability: 1.0,
        }
    }
}

/// Synthetic failure settings for one endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureConfig {
    /// Whether failure injection is active
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bernoulli failure probability in [0, 1]; ignored when
    /// `consecutive_failures` is set
    #[serde(default)]
    pub failure_rate: f64,

    /// Kind of failure to report
    #[serde(default = "default_error_kind")]
    pub error_kind: FailureKind,

    /// Explicit status code overriding the kind's default
    #[serde(default)]
    pub http_status: Option<u16>,

    /// Explicit message overriding the kind's default
    #[serde(default)]
    pub error_message: Option<String>,

    /// When positive, switches to the deterministic cycle: this many
    /// failures in a row before any pass
    #[serde(default)]
    pub consecutive_failures: u32,

    /// Passes emitted between failure bursts; only meaningful when
    /// `consecutive_failures` is positive
    #[serde(default)]
    pub consecutive_successes: u32,
}

const fn default_error_kind() -> FailureKind {
    FailureKind::ServerError
}

impl Default for FailureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            failure_rate: 0.0,
            error_kind: FailureKind::ServerError,
            http_status: None,
            error_message: None,
            consecutive_failures: 0,
            consecutive_successes: 0,
        }
    }
}

/// Chaos settings for one named endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointChaos {
    /// Whether any chaos applies to this endpoint
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Latency injection settings
    #[serde(default)]
    pub latency: Option<LatencyConfig>,

    /// Failure injection settings
    #[serde(default)]
    pub failure: Option<FailureConfig>,
}

impl Default for EndpointChaos {
    fn default() -> Self {
        Self {
            enabled: true,
            latency: None,
            failure: None,
        }
    }
}

/// A named bundle of endpoint overrides, activated as a unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// What this scenario simulates
    #[serde(default)]
    pub description: String,

    /// Endpoint entries replacing same-named base entries wholesale
    #[serde(default)]
    pub endpoints: HashMap<String, EndpointChaos>,
}

/// Fallback values for ad-hoc tooling and future endpoint entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalDefaults {
    /// Default latency in milliseconds
    #[serde(default)]
    pub default_latency_ms: u64,

    /// Default failure rate in [0, 1]
    #[serde(default)]
    pub default_failure_rate: f64,

    /// Default failure kind
    #[serde(default = "default_error_kind")]
    pub default_error_kind: FailureKind,
}

impl Default for GlobalDefaults {
    fn default() -> Self {
        Self {
            default_latency_ms: 0,
            default_failure_rate: 0.0,
            default_error_kind: FailureKind::ServerError,
        }
    }
}

/// Immutable snapshot of all chaos settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChaosConfig {
    /// Global kill switch; when false the engine does nothing at all
    #[serde(default)]
    pub enabled: bool,

    /// Per-endpoint chaos specs, keyed by canonical endpoint name
    #[serde(default)]
    pub endpoints: HashMap<String, EndpointChaos>,

    /// Named scenarios of endpoint overrides
    #[serde(default)]
    pub scenarios: HashMap<String, ScenarioConfig>,

    /// Global fallback values
    #[serde(default)]
    pub global_defaults: GlobalDefaults,
}

impl ChaosConfig {
    /// Validate every rate and probability eagerly.
    ///
    /// Invalid values fail at startup instead of being clamped at
    /// decision time.
    pub fn validate(&self) -> Result<(), ChaosConfigError> {
        for (name, endpoint) in &self.endpoints {
            Self::validate_endpoint(&format!("endpoints.{name}"), endpoint)?;
        }
        for (scenario_name, scenario) in &self.scenarios {
            for (name, endpoint) in &scenario.endpoints {
                Self::validate_endpoint(
                    &format!("scenarios.{scenario_name}.endpoints.{name}"),
                    endpoint,
                )?;
            }
        }
        check_unit_interval(
            "global_defaults.default_failure_rate",
            self.global_defaults.default_failure_rate,
        )?;
        Ok(())
    }

    fn validate_endpoint(path: &str, endpoint: &EndpointChaos) -> Result<(), ChaosConfigError> {
        if let Some(latency) = &endpoint.latency {
            check_unit_interval(&format!("{path}.latency.probability"), latency.probability)?;
        }
        if let Some(failure) = &endpoint.failure {
            check_unit_interval(&format!("{path}.failure.failure_rate"), failure.failure_rate)?;
        }
        Ok(())
    }
}

fn check_unit_interval(path: &str, value: f64) -> Result<(), ChaosConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ChaosConfigError::RateOutOfRange {
            path: path.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint_with_rate(rate: f64) -> EndpointChaos {
        EndpointChaos {
            enabled: true,
            latency: None,
            failure: Some(FailureConfig {
                failure_rate: rate,
                ..FailureConfig::default()
            }),
        }
    }

    #[test]
    fn failure_kind_default_statuses() {
        assert_eq!(FailureKind::Timeout.default_status(), 408);
        assert_eq!(FailureKind::ServerError.default_status(), 500);
        assert_eq!(FailureKind::ServiceUnavailable.default_status(), 503);
        assert_eq!(FailureKind::BadRequest.default_status(), 400);
        assert_eq!(FailureKind::Conflict.default_status(), 409);
        assert_eq!(FailureKind::RateLimit.default_status(), 429);
        assert_eq!(FailureKind::NetworkError.default_status(), 503);
    }

    #[test]
    fn failure_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&FailureKind::ServiceUnavailable).unwrap();
        assert_eq!(json, "\"SERVICE_UNAVAILABLE\"");
        let parsed: FailureKind = serde_json::from_str("\"RANDOM\"").unwrap();
        assert_eq!(parsed, FailureKind::Random);
    }

    #[test]
    fn random_is_not_in_concrete_table() {
        assert!(!FailureKind::CONCRETE.contains(&FailureKind::Random));
        assert_eq!(FailureKind::CONCRETE.len(), 7);
    }

    #[test]
    fn config_deserializes_from_toml() {
        let raw = r#"
            enabled = true

            [endpoints.payment]
            enabled = true

            [endpoints.payment.latency]
            min_delay_ms = 100
            max_delay_ms = 500
            probability = 0.5

            [endpoints.payment.failure]
            failure_rate = 0.3
            error_kind = "SERVICE_UNAVAILABLE"

            [scenarios.black-friday]
            description = "everything is slow and flaky"

            [scenarios.black-friday.endpoints.payment.failure]
            failure_rate = 0.9
        "#;
        let config: ChaosConfig = toml::from_str(raw).unwrap();
        assert!(config.enabled);
        let payment = &config.endpoints["payment"];
        let latency = payment.latency.as_ref().unwrap();
        assert_eq!(latency.min_delay_ms, 100);
        assert!((latency.probability - 0.5).abs() < f64::EPSILON);
        let failure = payment.failure.as_ref().unwrap();
        assert_eq!(failure.error_kind, FailureKind::ServiceUnavailable);
        assert!(config.scenarios.contains_key("black-friday"));
    }

    #[test]
    fn defaults_are_benign() {
        let config = ChaosConfig::default();
        assert!(!config.enabled);
        assert!(config.endpoints.is_empty());
        assert!((config.global_defaults.default_failure_rate).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_accepts_boundary_rates() {
        let mut config = ChaosConfig::default();
        config.endpoints.insert("a".to_string(), endpoint_with_rate(0.0));
        config.endpoints.insert("b".to_string(), endpoint_with_rate(1.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut config = ChaosConfig::default();
        config
            .endpoints
            .insert("payment".to_string(), endpoint_with_rate(1.5));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("endpoints.payment.failure.failure_rate"));
    }

    #[test]
    fn validate_rejects_negative_probability() {
        let mut config = ChaosConfig::default();
        config.endpoints.insert(
            "ship".to_string(),
            EndpointChaos {
                enabled: true,
                latency: Some(LatencyConfig {
                    probability: -0.1,
                    ..LatencyConfig::default()
                }),
                failure: None,
            },
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_covers_scenario_overrides() {
        let mut config = ChaosConfig::default();
        let mut scenario = ScenarioConfig {
            description: "broken".to_string(),
            endpoints: HashMap::new(),
        };
        scenario
            .endpoints
            .insert("payment".to_string(), endpoint_with_rate(2.0));
        config.scenarios.insert("bad".to_string(), scenario);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scenarios.bad.endpoints.payment"));
    }

    #[test]
    fn validate_covers_global_defaults() {
        let config = ChaosConfig {
            global_defaults: GlobalDefaults {
                default_failure_rate: -1.0,
                ..GlobalDefaults::default()
            },
            ..ChaosConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_roundtrips_through_json() {
        let mut config = ChaosConfig::default();
        config
            .endpoints
            .insert("place".to_string(), endpoint_with_rate(0.25));
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ChaosConfig = serde_json::from_str(&json).unwrap();
        let failure = parsed.endpoints["place"].failure.as_ref().unwrap();
        assert!((failure.failure_rate - 0.25).abs() < f64::EPSILON);
    }
}
