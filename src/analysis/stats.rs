//! Latency statistics, jitter, and the consistency sub-score.

use crate::humanize::format_time_human;
use crate::model::LatencyStats;

/// Round to two decimal places, matching the precision of reported scores.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Min/max/mean/median/population-stddev over successful latencies.
///
/// Every field is `None` when there are no samples. Standard deviation is
/// population (divide by N), taken over the samples in arrival order.
pub fn compute_latency_stats(times: &[f64]) -> LatencyStats {
    if times.is_empty() {
        return LatencyStats::default();
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("latency is never NaN"));

    let n = sorted.len();
    let avg = times.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let variance = times.iter().map(|t| (t - avg).powi(2)).sum::<f64>() / n as f64;

    let min = sorted[0];
    let max = sorted[n - 1];
    LatencyStats {
        min_ms: Some(min),
        max_ms: Some(max),
        avg_ms: Some(avg),
        median_ms: Some(median),
        stddev_ms: Some(variance.sqrt()),
        min_human: Some(format_time_human(min)),
        max_human: Some(format_time_human(max)),
    }
}

/// Mean absolute successive latency delta, in original arrival order.
///
/// This is deliberately not RFC 3550 interarrival jitter; the quality and
/// consistency formulas are calibrated to this definition.
pub fn compute_jitter(times: &[f64]) -> Option<f64> {
    if times.len() < 2 {
        return None;
    }
    let sum: f64 = times.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    Some(sum / (times.len() - 1) as f64)
}

/// Stability sub-score in [0, 100]: 100 at zero jitter, 0 at or beyond the
/// threshold's worth of jitter. A sample set too small to have jitter scores 100.
pub fn compute_consistency(times: &[f64], jitter_threshold_ms: f64) -> f64 {
    match compute_jitter(times) {
        None => 100.0,
        Some(jitter) => round2((100.0 - (jitter / jitter_threshold_ms) * 100.0).max(0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn stats_over_odd_count() {
        let stats = compute_latency_stats(&[30.0, 10.0, 20.0]);
        assert_eq!(stats.min_ms, Some(10.0));
        assert_eq!(stats.max_ms, Some(30.0));
        assert_eq!(stats.avg_ms, Some(20.0));
        assert_eq!(stats.median_ms, Some(20.0));
        // population stddev of {10,20,30} around 20
        assert_close(stats.stddev_ms.unwrap(), (200.0f64 / 3.0).sqrt());
    }

    #[test]
    fn median_averages_central_pair_for_even_count() {
        let stats = compute_latency_stats(&[40.0, 10.0, 30.0, 20.0]);
        assert_eq!(stats.median_ms, Some(25.0));
    }

    #[test]
    fn empty_input_is_all_none() {
        let stats = compute_latency_stats(&[]);
        assert_eq!(stats, LatencyStats::default());
    }

    #[test]
    fn single_sample_has_zero_stddev() {
        let stats = compute_latency_stats(&[42.0]);
        assert_eq!(stats.stddev_ms, Some(0.0));
        assert_eq!(stats.median_ms, Some(42.0));
    }

    #[test]
    fn jitter_is_mean_absolute_successive_delta() {
        // |20-10| + |5-20| + |25-5| = 45, over 3 deltas
        assert_close(compute_jitter(&[10.0, 20.0, 5.0, 25.0]).unwrap(), 15.0);
    }

    #[test]
    fn jitter_uses_arrival_order_not_sorted_order() {
        let arrival = compute_jitter(&[30.0, 10.0, 20.0]).unwrap();
        let sorted = compute_jitter(&[10.0, 20.0, 30.0]).unwrap();
        assert_close(arrival, 15.0);
        assert_close(sorted, 10.0);
    }

    #[test]
    fn jitter_needs_two_samples() {
        assert_eq!(compute_jitter(&[]), None);
        assert_eq!(compute_jitter(&[12.0]), None);
    }

    #[test]
    fn consistency_scales_against_threshold() {
        // constant deltas of 10ms against a 50ms threshold: 100 - 20 = 80
        let times = [10.0, 20.0, 30.0, 40.0];
        assert_close(compute_consistency(&times, 50.0), 80.0);
    }

    #[test]
    fn consistency_floors_at_zero() {
        let times = [0.0, 200.0, 0.0, 200.0];
        assert_close(compute_consistency(&times, 50.0), 0.0);
    }

    #[test]
    fn consistency_is_perfect_without_jitter() {
        assert_close(compute_consistency(&[], 50.0), 100.0);
        assert_close(compute_consistency(&[33.0], 50.0), 100.0);
    }
}
