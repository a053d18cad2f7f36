//! JSON export of run reports.

use crate::model::RunReport;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Write the full report (config, analysis, raw entries) as pretty JSON.
pub fn export_json(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Default export filename: host plus timestamp, in the current directory.
pub fn default_export_path(report: &RunReport) -> Result<PathBuf> {
    let host: String = report
        .host
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let name = format!(
        "pingscope-{}-{}.json",
        host,
        report.timestamp_utc.replace(':', "-").replace('T', "_")
    );
    let current_dir = std::env::current_dir().context("get current directory")?;
    Ok(current_dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_output;
    use crate::model::{AnalysisOptions, RunConfig};
    use std::time::Duration;

    fn sample_report() -> RunReport {
        let options = AnalysisOptions::default();
        RunReport {
            timestamp_utc: "2026-01-02T03:04:05Z".to_string(),
            host: "dns.google".to_string(),
            duration: "3s".to_string(),
            config: RunConfig {
                host: "dns.google".to_string(),
                count: Some(3),
                interval: Duration::from_secs(1),
                timeout: Duration::from_secs(5),
                size: None,
                analysis: options,
            },
            analysis: analyze_output(
                "64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=20ms",
                &options,
            ),
            entries: Vec::new(),
        }
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = sample_report();
        let json = serde_json::to_string_pretty(&report).unwrap();
        let back: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.host, report.host);
        assert_eq!(back.analysis, report.analysis);
    }

    #[test]
    fn default_path_sanitizes_the_host() {
        let path = default_export_path(&sample_report()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("pingscope-dns-google-"));
        assert!(name.ends_with(".json"));
    }
}
