use drillforge::stats::{SequenceStats, PERFECT};
use proptest::prelude::*;

// --- STRATEGIES ---

prop_compose! {
    fn arb_attempt()(
        elapsed_ms in 1u64..60_000,
        perfect in any::<bool>(),
        miss in 0u8..100
    ) -> (u64, u8) {
        (elapsed_ms, if perfect { PERFECT } else { miss })
    }
}

fn fold(attempts: &[(u64, u8)]) -> SequenceStats {
    attempts
        .iter()
        .fold(SequenceStats::default(), |s, (ms, acc)| s.record(*ms, *acc))
}

proptest! {
    #[test]
    fn prop_best_time_is_min_perfect_time(attempts in prop::collection::vec(arb_attempt(), 0..40)) {
        let stats = fold(&attempts);
        let expected = attempts
            .iter()
            .filter(|(_, acc)| *acc == PERFECT)
            .map(|(ms, _)| *ms)
            .min();
        prop_assert_eq!(stats.best_time_ms, expected);
    }

    #[test]
    fn prop_best_time_never_regresses(attempts in prop::collection::vec(arb_attempt(), 1..40)) {
        let mut stats = SequenceStats::default();
        for (ms, acc) in attempts {
            let before = stats.best_time_ms;
            stats = stats.record(ms, acc);
            if let (Some(b), Some(a)) = (before, stats.best_time_ms) {
                prop_assert!(a <= b);
            }
            if before.is_some() {
                prop_assert!(stats.best_time_ms.is_some());
            }
        }
    }

    #[test]
    fn prop_avg_perfect_is_mean_of_perfect_times(attempts in prop::collection::vec(arb_attempt(), 1..40)) {
        let stats = fold(&attempts);
        let perfect: Vec<u64> = attempts
            .iter()
            .filter(|(_, acc)| *acc == PERFECT)
            .map(|(ms, _)| *ms)
            .collect();

        let display = stats.display().unwrap();
        prop_assert_eq!(display.attempts, attempts.len() as u64);
        prop_assert_eq!(display.perfect_attempts, perfect.len() as u64);
        match display.avg_perfect_time_sec {
            Some(avg) => {
                let mean = perfect.iter().sum::<u64>() as f64 / perfect.len() as f64 / 1000.0;
                prop_assert!((avg - mean).abs() < 1e-9);
            }
            None => prop_assert!(perfect.is_empty()),
        }
    }

    #[test]
    fn prop_totals_survive_a_json_round_trip(attempts in prop::collection::vec(arb_attempt(), 0..20)) {
        let stats = fold(&attempts);
        let json = serde_json::to_string(&stats).unwrap();
        let back: SequenceStats = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, stats);
    }
}
