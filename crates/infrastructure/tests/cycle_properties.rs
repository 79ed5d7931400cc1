//! Property tests for the deterministic failure cycle

use infrastructure::chaos::config::FailureConfig;
use infrastructure::chaos::failure::{decide, EndpointState};
use proptest::prelude::*;

proptest! {
    /// Call `i` of a deterministic cycle fails iff `i % cycle_len` falls in
    /// the failing phase, where a zero-success cycle closes with a single
    /// neutral pass.
    #[test]
    fn cycle_matches_closed_form(
        failures in 1u32..6,
        successes in 0u32..6,
        calls in 1usize..200,
    ) {
        let config = FailureConfig {
            consecutive_failures: failures,
            consecutive_successes: successes,
            ..FailureConfig::default()
        };
        let mut state = EndpointState::default();

        let effective_successes = if successes == 0 { 1 } else { successes };
        let cycle_len = (failures + effective_successes) as usize;

        for i in 0..calls {
            let expected = i % cycle_len < failures as usize;
            prop_assert_eq!(
                decide(&config, &mut state),
                expected,
                "call {} of cycle {}+{}",
                i,
                failures,
                successes
            );
        }
    }

    /// The cycle net length is failures + successes calls (successes > 0):
    /// one full pass over it emits exactly `failures` fails.
    #[test]
    fn one_full_cycle_emits_exactly_the_configured_fails(
        failures in 1u32..6,
        successes in 1u32..6,
    ) {
        let config = FailureConfig {
            consecutive_failures: failures,
            consecutive_successes: successes,
            ..FailureConfig::default()
        };
        let mut state = EndpointState::default();

        let cycle_len = (failures + successes) as usize;
        let fails = (0..cycle_len).filter(|_| decide(&config, &mut state)).count();
        prop_assert_eq!(fails, failures as usize);
        // A full cycle ends exactly on the counter reset.
        prop_assert_eq!(state.failure_count, 0);
        prop_assert_eq!(state.success_count, 0);
    }

    /// The cycle is position-deterministic: two independent states fed the
    /// same number of calls end in the same counters.
    #[test]
    fn cycle_is_deterministic(
        failures in 1u32..6,
        successes in 0u32..6,
        calls in 0usize..100,
    ) {
        let config = FailureConfig {
            consecutive_failures: failures,
            consecutive_successes: successes,
            ..FailureConfig::default()
        };
        let mut a = EndpointState::default();
        let mut b = EndpointState::default();
        for _ in 0..calls {
            prop_assert_eq!(decide(&config, &mut a), decide(&config, &mut b));
        }
        prop_assert_eq!(a.failure_count, b.failure_count);
        prop_assert_eq!(a.success_count, b.success_count);
    }
}
