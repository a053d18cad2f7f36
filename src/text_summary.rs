//! Text summary builder for CLI output.
//!
//! Formats an analysis report into human-readable lines for text mode.

use crate::model::{AnalysisReport, RunReport, StreakKind};

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Build a text summary from a completed run.
pub(crate) fn build_text_summary(report: &RunReport) -> TextSummary {
    let mut lines = vec![format!(
        "Host: {} ({} over {})",
        report.host,
        plural(report.analysis.total_packets, "packet"),
        report.duration
    )];
    lines.extend(analysis_lines(&report.analysis));
    TextSummary { lines }
}

pub(crate) fn analysis_lines(a: &AnalysisReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "Packets: {} sent, {} received, {:.1}% loss",
        a.total_packets, a.successful_packets, a.packet_loss
    ));

    if let (Some(min), Some(avg), Some(max)) =
        (a.latency.min_ms, a.latency.avg_ms, a.latency.max_ms)
    {
        lines.push(format!(
            "Latency: min {:.1} avg {:.1} max {:.1} med {:.1} stddev {:.1} ms",
            min,
            avg,
            max,
            a.latency.median_ms.unwrap_or(f64::NAN),
            a.latency.stddev_ms.unwrap_or(f64::NAN),
        ));
        if let (Some(min_h), Some(max_h)) = (&a.latency.min_human, &a.latency.max_human) {
            lines.push(format!("Fastest: {min_h}, slowest: {max_h}"));
        }
    } else {
        lines.push("Latency: no successful responses".to_string());
    }

    match a.jitter_ms {
        Some(jitter) => lines.push(format!(
            "Jitter: {:.1} ms, consistency {:.0}/100",
            jitter, a.consistency
        )),
        None => lines.push(format!("Jitter: n/a, consistency {:.0}/100", a.consistency)),
    }

    let current = match a.streaks.current.kind {
        StreakKind::Success => "success",
        StreakKind::Failure => "failure",
    };
    lines.push(format!(
        "Streaks: longest success {}, longest failure {}, current {} x{}",
        a.streaks.longest_success, a.streaks.longest_failure, current, a.streaks.current.count
    ));

    if a.failed_packets > 0 {
        lines.push(format!(
            "Errors: {} timeouts, {} unreachable, {} other",
            a.errors.timeouts, a.errors.unreachable, a.errors.other
        ));
    }

    if !a.time_distribution.is_empty() {
        let bands: Vec<String> = a
            .time_distribution
            .iter()
            .map(|b| format!("{} {}", b.label, b.count))
            .collect();
        lines.push(format!("Distribution: {}", bands.join(", ")));
    }

    lines.push(format!(
        "Quality: {:.2}/100 ({}), {}",
        a.quality_score,
        a.quality,
        if a.is_stable { "stable" } else { "unstable" }
    ));
    lines.push(format!("Recommendation: {}", a.recommendation));

    lines
}

fn plural(count: u64, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
