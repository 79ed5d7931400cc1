//! Concurrency properties of the chaos engine
//!
//! Parallel callers against one endpoint must collectively observe the
//! deterministic cycle with no lost counter updates, and callers against
//! distinct endpoints must not interfere with each other.

use std::sync::Arc;

use infrastructure::chaos::{
    ChaosConfig, ChaosEngine, EndpointChaos, FailureConfig,
};

fn cycle_endpoint(failures: u32, successes: u32) -> EndpointChaos {
    EndpointChaos {
        enabled: true,
        latency: None,
        failure: Some(FailureConfig {
            consecutive_failures: failures,
            consecutive_successes: successes,
            ..FailureConfig::default()
        }),
    }
}

fn engine_with(endpoints: Vec<(&str, EndpointChaos)>) -> Arc<ChaosEngine> {
    let mut config = ChaosConfig {
        enabled: true,
        ..ChaosConfig::default()
    };
    for (name, endpoint) in endpoints {
        config.endpoints.insert(name.to_string(), endpoint);
    }
    Arc::new(ChaosEngine::new(config))
}

/// Expected number of fails for `calls` sequential decisions of a
/// `failures`/`successes` cycle: position `i` fails iff
/// `i % cycle_len < failures`, where a zero-success cycle still closes
/// with one neutral pass.
fn expected_fails(failures: u32, successes: u32, calls: usize) -> usize {
    let effective_successes = if successes == 0 { 1 } else { successes };
    let cycle_len = (failures + effective_successes) as usize;
    (0..calls).filter(|i| i % cycle_len < failures as usize).count()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn parallel_callers_one_endpoint_match_cycle_tally() {
    let engine = engine_with(vec![("payment", cycle_endpoint(2, 1))]);

    let calls = 33;
    let mut handles = Vec::with_capacity(calls);
    for _ in 0..calls {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine.evaluate("payment").await.decision.is_fail()
        }));
    }

    let mut fails = 0;
    let mut decisions = 0;
    for handle in handles {
        decisions += 1;
        if handle.await.unwrap() {
            fails += 1;
        }
    }

    assert_eq!(decisions, calls);
    // 33 calls over a [fail, fail, pass] cycle: 11 full cycles, 22 fails.
    assert_eq!(fails, expected_fails(2, 1, calls));

    // 11 full cycles end exactly on a reset; no lost updates anywhere.
    let stats = engine.statistics();
    assert_eq!(stats.endpoints["payment"].failure_count, 0);
    assert_eq!(stats.endpoints["payment"].success_count, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn distinct_endpoints_do_not_interfere() {
    let engine = engine_with(vec![
        ("payment", cycle_endpoint(2, 1)),
        ("ship", cycle_endpoint(3, 2)),
    ]);

    let per_endpoint = 30;
    let mut handles = Vec::new();
    for endpoint in ["payment", "ship"] {
        for _ in 0..per_endpoint {
            let engine = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                (endpoint, engine.evaluate(endpoint).await.decision.is_fail())
            }));
        }
    }

    let mut payment_fails = 0;
    let mut ship_fails = 0;
    for handle in handles {
        match handle.await.unwrap() {
            ("payment", true) => payment_fails += 1,
            ("ship", true) => ship_fails += 1,
            _ => {},
        }
    }

    // Each endpoint observes its own locally correct cycle.
    assert_eq!(payment_fails, expected_fails(2, 1, per_endpoint));
    assert_eq!(ship_fails, expected_fails(3, 2, per_endpoint));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn probabilistic_counters_survive_contention() {
    let endpoint = EndpointChaos {
        enabled: true,
        latency: None,
        failure: Some(FailureConfig {
            failure_rate: 1.0,
            ..FailureConfig::default()
        }),
    };
    let engine = engine_with(vec![("payment", endpoint)]);

    let calls = 200;
    let mut handles = Vec::with_capacity(calls);
    for _ in 0..calls {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine.evaluate("payment").await.decision.is_fail()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    // Every failing trial incremented the counter exactly once.
    let stats = engine.statistics();
    assert_eq!(stats.endpoints["payment"].failure_count, calls as u64);
}
