//! Human-readable formatting of latencies and elapsed durations.

use std::time::Duration;

/// Latency with a plain-language performance assessment.
pub fn format_time_human(time_ms: f64) -> String {
    if time_ms < 1.0 {
        format!("{:.0} microseconds (instant)", time_ms * 1000.0)
    } else if time_ms < 10.0 {
        format!("{:.2} ms (excellent)", time_ms)
    } else if time_ms < 50.0 {
        format!("{:.2} ms (very good)", time_ms)
    } else if time_ms < 100.0 {
        format!("{:.2} ms (good)", time_ms)
    } else if time_ms < 200.0 {
        format!("{:.2} ms (acceptable)", time_ms)
    } else if time_ms < 500.0 {
        format!("{:.2} ms (slow)", time_ms)
    } else if time_ms < 1000.0 {
        format!("{:.2} ms (very slow)", time_ms)
    } else if time_ms < 2000.0 {
        format!("{:.2} seconds (poor)", time_ms / 1000.0)
    } else {
        format!("{:.2} seconds (critical)", time_ms / 1000.0)
    }
}

/// Elapsed wall-clock time as "2h 5m 3s" / "5m 3s" / "3s".
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let minutes = secs / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, secs % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs % 60)
    } else {
        format!("{}s", secs)
    }
}
