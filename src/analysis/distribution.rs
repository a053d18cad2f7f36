//! Fixed-band histogram of successful response times.

use crate::model::TimeBucket;

/// Band upper bounds in milliseconds; the last band is the catch-all.
const BANDS: [(&str, f64); 4] = [
    ("0-50ms", 50.0),
    ("51-100ms", 100.0),
    ("101-200ms", 200.0),
    ("201-500ms", 500.0),
];
const OVERFLOW_BAND: &str = "500ms+";

/// Bucket each latency into the first band whose bound it does not exceed.
///
/// All bands are present in fixed order, zero counts included; an input with
/// no successful latencies yields an empty histogram.
pub fn time_distribution(times: &[f64]) -> Vec<TimeBucket> {
    if times.is_empty() {
        return Vec::new();
    }

    let mut buckets: Vec<TimeBucket> = BANDS
        .iter()
        .map(|(label, _)| TimeBucket {
            label: (*label).to_string(),
            count: 0,
        })
        .chain(std::iter::once(TimeBucket {
            label: OVERFLOW_BAND.to_string(),
            count: 0,
        }))
        .collect();

    for &time in times {
        let idx = BANDS
            .iter()
            .position(|(_, bound)| time <= *bound)
            .unwrap_or(BANDS.len());
        buckets[idx].count += 1;
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(times: &[f64]) -> Vec<u64> {
        time_distribution(times).iter().map(|b| b.count).collect()
    }

    #[test]
    fn empty_input_yields_empty_histogram() {
        assert!(time_distribution(&[]).is_empty());
    }

    #[test]
    fn bands_are_present_and_ordered_even_when_zero() {
        let buckets = time_distribution(&[10.0]);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["0-50ms", "51-100ms", "101-200ms", "201-500ms", "500ms+"]);
        assert_eq!(counts(&[10.0]), [1, 0, 0, 0, 0]);
    }

    #[test]
    fn each_latency_lands_in_exactly_one_band() {
        assert_eq!(counts(&[5.0, 15.0, 25.0, 55.0, 150.0]), [3, 1, 1, 0, 0]);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(counts(&[50.0, 100.0, 200.0, 500.0, 500.1]), [1, 1, 1, 1, 1]);
    }
}
