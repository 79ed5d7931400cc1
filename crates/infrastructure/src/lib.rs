//! Infrastructure layer for ChaosCart
//!
//! Hosts the chaos injection engine and application configuration loading.
//! The chaos engine is the heart of this repository: everything else exists
//! so that callers have a realistic surface to point their Saga resilience
//! tests at.

pub mod chaos;
pub mod config;

pub use chaos::{
    ChaosConfig, ChaosConfigError, ChaosEngine, ChaosError, ChaosOutcome, ChaosStats,
    ChaosSummary, Decision, EndpointChaos, EndpointState, FailureConfig, FailureKind,
    GlobalDefaults, InjectedFailure, LatencyConfig, ScenarioConfig,
};
pub use config::{AppConfig, ConfigError, ServerConfig};
