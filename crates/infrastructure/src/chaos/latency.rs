//! Latency injector
//!
//! Computes a delay for one evaluation and, when positive, suspends the
//! calling task for that duration. The suspension is the observable effect;
//! it must never run inside an engine-wide critical section, so the engine
//! calls this before touching any shared state.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::trace;

use super::config::LatencyConfig;

/// Compute the delay in milliseconds for one evaluation without applying it.
///
/// Rules, in order:
/// - disabled config ⇒ 0
/// - a uniform draw above `probability` ⇒ 0 (extremes are short-circuited:
///   0 never delays, 1 always does)
/// - `fixed_delay_ms` wins when present
/// - `max_delay_ms > min_delay_ms` ⇒ uniform draw in `[min, max)`
/// - otherwise `min_delay_ms` as a constant, no draw attempted
#[must_use]
pub fn compute_delay(config: &LatencyConfig) -> u64 {
    if !config.enabled {
        return 0;
    }

    if config.probability <= 0.0 {
        return 0;
    }
    if config.probability < 1.0 {
        let roll: f64 = rand::rng().random();
        if roll > config.probability {
            return 0;
        }
    }

    if let Some(fixed) = config.fixed_delay_ms {
        return fixed;
    }
    if config.max_delay_ms > config.min_delay_ms {
        return rand::rng().random_range(config.min_delay_ms..config.max_delay_ms);
    }
    config.min_delay_ms
}

/// Compute and apply the delay for one evaluation.
///
/// Returns the delay actually applied (0 if none). The sleep blocks only
/// the calling task and cannot be cancelled from inside the engine; an
/// external request timeout may abandon the connection, but the delay runs
/// to completion.
pub async fn inject(config: Option<&LatencyConfig>) -> u64 {
    let delay_ms = config.map_or(0, compute_delay);
    if delay_ms > 0 {
        trace!(delay_ms, "injecting latency");
        sleep(Duration::from_millis(delay_ms)).await;
    }
    delay_ms
}
