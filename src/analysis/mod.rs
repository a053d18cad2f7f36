//! The analyze pipeline: entries in, one immutable report out.
//!
//! Pure and synchronous; every invocation recomputes the full report from the
//! whole transcript, so re-running on identical text yields identical results.

pub mod distribution;
pub mod errors;
pub mod quality;
pub mod stats;
pub mod streaks;

use crate::model::{AnalysisOptions, AnalysisReport, PingEntry};
use crate::parser::parse_output;

/// Parse a ping transcript and derive the full analysis report.
///
/// Total over every string input: malformed lines are dropped at
/// classification and an empty transcript yields an all-zero report.
pub fn analyze_output(output: &str, options: &AnalysisOptions) -> AnalysisReport {
    analyze_entries(&parse_output(output), options)
}

/// Analyze an already-classified entry sequence.
pub fn analyze_entries(entries: &[PingEntry], options: &AnalysisOptions) -> AnalysisReport {
    let response_times: Vec<f64> = entries.iter().filter_map(PingEntry::time_ms).collect();
    let sequence_numbers: Vec<u64> = entries.iter().filter_map(|e| e.sequence).collect();

    let total_packets = entries.len() as u64;
    let successful_packets = response_times.len() as u64;
    let failed_packets = total_packets - successful_packets;

    let latency = stats::compute_latency_stats(&response_times);
    let error_counts = errors::categorize_errors(entries);
    let streak_summary = streaks::analyze_streaks(entries);
    let jitter_ms = stats::compute_jitter(&response_times);
    let consistency = stats::compute_consistency(&response_times, options.jitter_threshold_ms);
    let time_distribution = distribution::time_distribution(&response_times);

    // All rates guard on an empty run instead of dividing by zero.
    let rate = |count: u64| {
        if total_packets > 0 {
            count as f64 / total_packets as f64 * 100.0
        } else {
            0.0
        }
    };
    let success_rate = rate(successful_packets);
    let failure_rate = rate(failed_packets);
    let timeout_rate = rate(error_counts.timeouts);
    let unreachable_rate = rate(error_counts.unreachable);

    let quality_score = quality::quality_score(success_rate, latency.avg_ms, jitter_ms, consistency);
    let is_stable = quality::is_stable(
        failure_rate,
        consistency,
        jitter_ms,
        streak_summary.longest_failure,
        total_packets,
    );
    let recommendation = quality::recommendation(quality_score, is_stable, &error_counts);

    AnalysisReport {
        total_packets,
        successful_packets,
        failed_packets,
        latency,
        success_rate,
        failure_rate,
        timeout_rate,
        unreachable_rate,
        packet_loss: failure_rate,
        jitter_ms,
        consistency,
        streaks: streak_summary,
        errors: error_counts,
        response_times,
        sequence_numbers,
        time_distribution,
        quality_score,
        quality: quality::quality_label(quality_score),
        is_stable,
        recommendation,
    }
}
