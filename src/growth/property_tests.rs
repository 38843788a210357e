//! Property tests for growth module
//!
//! Covers the multiplicative recurrence, monotonic growth and the derived
//! kill count.

use proptest::prelude::*;

use crate::growth::{advance_period, killed_count, GrowthParams, GrowthSession, GrowthState};

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

/// Generate valid growth params
fn params_strategy() -> impl Strategy<Value = GrowthParams> {
    (0.5..=1000.0f64, 1.0..=4.0f64, 0.0..=1.0f64).prop_map(
        |(seed_infected, reproduction_factor, kill_rate)| {
            GrowthParams::new(seed_infected, reproduction_factor, kill_rate).unwrap()
        },
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Infected count never decreases from one week to the next
    #[test]
    fn prop_infected_non_decreasing(params in params_strategy(), weeks in 1..=2000usize) {
        let mut state = GrowthState::initial(&params);
        for _ in 0..weeks {
            let next = advance_period(state, &params);
            prop_assert!(next.infected >= state.infected);
            prop_assert!(next.infected.is_finite());
            prop_assert_eq!(next.period, state.period + 1);
            state = next;
        }
    }

    /// After n weeks with factor 2 the count is seed * 2^n
    #[test]
    fn prop_doubling_is_multiplicative(seed in 1..=1000u32, weeks in 0..=40u32) {
        let defaults = GrowthParams::default();
        let params =
            GrowthParams::new(seed as f64, defaults.reproduction_factor(), defaults.kill_rate())
                .unwrap();
        let mut state = GrowthState::initial(&params);
        for _ in 0..weeks {
            state = advance_period(state, &params);
        }
        prop_assert_eq!(state.infected, seed as f64 * 2f64.powi(weeks as i32));
        prop_assert_eq!(state.period, weeks + 1);
    }

    /// Kill count always equals the rounded product, never a stored value
    #[test]
    fn prop_killed_is_derived(params in params_strategy(), weeks in 0..=60usize) {
        let mut session = GrowthSession::new(params);
        for _ in 0..weeks {
            session.advance();
        }
        let state = session.state();
        let snapshot = session.snapshot();
        prop_assert_eq!(snapshot.killed, (state.infected * params.kill_rate()).round() as u64);
        prop_assert_eq!(snapshot.killed, killed_count(&state, &params));
    }
}
