//! Chaos injection engine for Saga resilience testing.
//!
//! Callers exercise this service's order endpoints while the engine injects
//! artificial latency and synthetic failures according to per-endpoint
//! configuration, so that retry/compensation logic on the caller side can
//! be tested against a misbehaving collaborator.
//!
//! The engine consists of:
//! - `ChaosConfig`: immutable snapshot of chaos settings (endpoints,
//!   scenarios, defaults), validated at load time
//! - `latency`: computes and applies an artificial delay per evaluation
//! - `failure`: per-endpoint fail/pass decision engine with probabilistic
//!   and deterministic-cycle modes
//! - `ChaosEngine`: ties the pieces together and owns all runtime state
//!   (active scenario, per-endpoint counters)
//!
//! # Example
//!
//! ```ignore
//! use infrastructure::chaos::{ChaosConfig, ChaosEngine, Decision};
//!
//! let engine = ChaosEngine::new(config);
//! let outcome = engine.evaluate("payment").await;
//! match outcome.decision {
//!     Decision::Pass => { /* run business logic */ },
//!     Decision::Fail(failure) => { /* short-circuit with failure.status */ },
//! }
//! ```

pub mod config;
pub mod engine;
pub mod failure;
pub mod latency;

pub use config::{
    ChaosConfig, ChaosConfigError, EndpointChaos, FailureConfig, FailureKind, GlobalDefaults,
    LatencyConfig, ScenarioConfig,
};
pub use engine::{ChaosEngine, ChaosError, ChaosOutcome, ChaosStats, ChaosSummary};
pub use failure::{Decision, EndpointState, InjectedFailure};
