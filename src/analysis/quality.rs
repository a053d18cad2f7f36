//! Composite quality scoring, stability verdict, and recommendations.

use crate::analysis::stats::round2;
use crate::model::{ErrorCounts, Quality};

const WEIGHT_SUCCESS_RATE: f64 = 0.4;
const WEIGHT_LATENCY: f64 = 0.3;
const WEIGHT_JITTER: f64 = 0.2;
const WEIGHT_CONSISTENCY: f64 = 0.1;

/// Weighted composite of success rate, latency, jitter, and consistency,
/// rounded to two decimals and in [0, 100] by construction.
pub fn quality_score(
    success_rate: f64,
    avg_time_ms: Option<f64>,
    jitter_ms: Option<f64>,
    consistency: f64,
) -> f64 {
    // Inverse latency score: 1000ms averages down to 0.
    let time_score = match avg_time_ms {
        Some(avg) => (100.0 - (avg / 10.0).min(100.0)).max(0.0),
        None => 0.0,
    };
    // Inverse jitter score: 50ms of jitter scores 0; no jitter reading scores full.
    let jitter_score = match jitter_ms {
        Some(jitter) => (100.0 - (jitter * 2.0).min(100.0)).max(0.0),
        None => 100.0,
    };

    round2(
        success_rate * WEIGHT_SUCCESS_RATE
            + time_score * WEIGHT_LATENCY
            + jitter_score * WEIGHT_JITTER
            + consistency * WEIGHT_CONSISTENCY,
    )
}

/// Map a score to its verdict; boundaries at 90/75/60/40.
pub fn quality_label(score: f64) -> Quality {
    if score >= 90.0 {
        Quality::Excellent
    } else if score >= 75.0 {
        Quality::Good
    } else if score >= 60.0 {
        Quality::Fair
    } else if score >= 40.0 {
        Quality::Poor
    } else {
        Quality::Critical
    }
}

/// Three-clause stability verdict.
///
/// Loss at most 5%, a reasonable consistency score or low jitter (a missing
/// jitter reading never satisfies the jitter clause on its own), and no
/// failure streak longer than 10% of the run (floor of 2).
pub fn is_stable(
    packet_loss_rate: f64,
    consistency: f64,
    jitter_ms: Option<f64>,
    longest_failure_streak: u64,
    total_packets: u64,
) -> bool {
    let low_loss = packet_loss_rate <= 5.0;
    let steady = consistency >= 60.0 || jitter_ms.is_some_and(|j| j <= 100.0);
    let short_failures =
        (longest_failure_streak as f64) <= (total_packets as f64 * 0.1).max(2.0);
    low_loss && steady && short_failures
}

/// Ordered decision table; the first matching rule wins.
pub fn recommendation(score: f64, stable: bool, errors: &ErrorCounts) -> String {
    if score >= 90.0 && stable {
        return "Excellent network performance. No action required.".to_string();
    }
    if score >= 70.0 {
        return if stable {
            "Good network performance with minor optimization opportunities.".to_string()
        } else {
            "Network performance is good but shows some instability. Monitor for patterns."
                .to_string()
        };
    }
    if errors.unreachable > errors.timeouts {
        return "High unreachable host errors detected. Check routing and firewall configurations."
            .to_string();
    }
    if errors.timeouts > 0 {
        return "Frequent timeouts detected. Investigate network congestion and connection stability."
            .to_string();
    }
    "Network performance issues detected. Consider checking connection quality and network infrastructure."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_inputs_score_100() {
        assert_eq!(quality_score(100.0, Some(0.0), Some(0.0), 100.0), 100.0);
    }

    #[test]
    fn missing_latency_zeroes_the_latency_term() {
        // 100*0.4 + 0*0.3 + 100*0.2 + 100*0.1
        assert_eq!(quality_score(100.0, None, None, 100.0), 70.0);
    }

    #[test]
    fn latency_term_saturates_at_1000ms() {
        let a = quality_score(100.0, Some(1000.0), Some(0.0), 100.0);
        let b = quality_score(100.0, Some(5000.0), Some(0.0), 100.0);
        assert_eq!(a, b);
    }

    #[test]
    fn jitter_term_saturates_at_50ms() {
        let a = quality_score(100.0, Some(10.0), Some(50.0), 100.0);
        let b = quality_score(100.0, Some(10.0), Some(500.0), 100.0);
        assert_eq!(a, b);
    }

    #[test]
    fn label_boundaries_are_exact() {
        assert_eq!(quality_label(90.0), Quality::Excellent);
        assert_eq!(quality_label(89.99), Quality::Good);
        assert_eq!(quality_label(75.0), Quality::Good);
        assert_eq!(quality_label(74.99), Quality::Fair);
        assert_eq!(quality_label(60.0), Quality::Fair);
        assert_eq!(quality_label(59.99), Quality::Poor);
        assert_eq!(quality_label(40.0), Quality::Poor);
        assert_eq!(quality_label(39.99), Quality::Critical);
    }

    #[test]
    fn stability_requires_low_loss() {
        assert!(is_stable(5.0, 100.0, Some(1.0), 0, 100));
        assert!(!is_stable(5.1, 100.0, Some(1.0), 0, 100));
    }

    #[test]
    fn null_jitter_cannot_satisfy_the_jitter_clause() {
        // consistency below 60 and no jitter reading: the middle clause fails.
        assert!(!is_stable(0.0, 59.0, None, 0, 10));
        // the same consistency with a measured low jitter passes.
        assert!(is_stable(0.0, 59.0, Some(80.0), 0, 10));
    }

    #[test]
    fn failure_streak_bound_has_a_floor_of_two() {
        // 10 packets: bound is max(2, 1) = 2
        assert!(is_stable(0.0, 100.0, Some(1.0), 2, 10));
        assert!(!is_stable(0.0, 100.0, Some(1.0), 3, 10));
        // 100 packets: bound is 10
        assert!(is_stable(0.0, 100.0, Some(1.0), 10, 100));
        assert!(!is_stable(0.0, 100.0, Some(1.0), 11, 100));
    }

    #[test]
    fn recommendation_rules_apply_in_order() {
        let none = ErrorCounts::default();
        assert!(recommendation(95.0, true, &none).starts_with("Excellent"));
        // High score without stability falls through to the 70+ branch.
        assert!(recommendation(95.0, false, &none).contains("instability"));
        assert!(recommendation(80.0, true, &none).starts_with("Good"));

        let unreachable_heavy = ErrorCounts {
            timeouts: 1,
            unreachable: 3,
            other: 0,
        };
        assert!(recommendation(50.0, false, &unreachable_heavy).contains("unreachable"));

        let timeout_heavy = ErrorCounts {
            timeouts: 4,
            unreachable: 1,
            other: 0,
        };
        assert!(recommendation(50.0, false, &timeout_heavy).contains("timeouts"));

        assert!(recommendation(50.0, false, &none).contains("infrastructure"));
    }
}
