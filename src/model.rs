use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for one probe run, persisted verbatim in exported reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub host: String,
    /// Number of packets to send; `None` pings until interrupted.
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Payload size in bytes, passed through to the ping binary.
    #[serde(default)]
    pub size: Option<u32>,
    pub analysis: AnalysisOptions,
}

/// Tunables for the analysis pipeline.
///
/// `timeout_threshold_ms` and `stability_threshold_pct` are accepted and
/// persisted for forward compatibility but drive no computation yet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub timeout_threshold_ms: f64,
    pub jitter_threshold_ms: f64,
    pub stability_threshold_pct: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            timeout_threshold_ms: 1000.0,
            jitter_threshold_ms: 50.0,
            stability_threshold_pct: 95.0,
        }
    }
}

/// Failure classification for a non-success entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Timeout,
    Unreachable,
    Other,
}

/// Outcome of one probe: a latency reading or a categorized failure.
///
/// Modeled as a sum type so an entry can never carry both a response time
/// and an error kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOutcome {
    Success { time_ms: f64 },
    Failure { kind: ErrorKind },
}

/// One classified line of probe output, in arrival order.
///
/// Sequence numbers are whatever the probe printed: duplicates, gaps, and
/// out-of-order values are preserved, not corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingEntry {
    #[serde(default)]
    pub sequence: Option<u64>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub source_ip: Option<String>,
    pub outcome: EntryOutcome,
}

impl PingEntry {
    pub fn success(
        sequence: Option<u64>,
        time_ms: f64,
        ttl: Option<u32>,
        source_ip: Option<String>,
    ) -> Self {
        Self {
            sequence,
            ttl,
            source_ip,
            outcome: EntryOutcome::Success { time_ms },
        }
    }

    pub fn failure(kind: ErrorKind, sequence: Option<u64>, source_ip: Option<String>) -> Self {
        Self {
            sequence,
            ttl: None,
            source_ip,
            outcome: EntryOutcome::Failure { kind },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, EntryOutcome::Success { .. })
    }

    pub fn time_ms(&self) -> Option<f64> {
        match self.outcome {
            EntryOutcome::Success { time_ms } => Some(time_ms),
            EntryOutcome::Failure { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self.outcome {
            EntryOutcome::Success { .. } => None,
            EntryOutcome::Failure { kind } => Some(kind),
        }
    }
}

/// Latency statistics over successful entries; all `None` when there were none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub min_ms: Option<f64>,
    pub max_ms: Option<f64>,
    pub avg_ms: Option<f64>,
    pub median_ms: Option<f64>,
    pub stddev_ms: Option<f64>,
    /// Human-readable assessment of `min_ms`/`max_ms`.
    #[serde(default)]
    pub min_human: Option<String>,
    #[serde(default)]
    pub max_human: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Success,
    Failure,
}

/// The run of consecutive same-outcome entries ending at the last entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStreak {
    pub kind: StreakKind,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub longest_success: u64,
    pub longest_failure: u64,
    pub current: CurrentStreak,
}

impl Default for StreakSummary {
    fn default() -> Self {
        Self {
            longest_success: 0,
            longest_failure: 0,
            current: CurrentStreak {
                kind: StreakKind::Success,
                count: 0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCounts {
    pub timeouts: u64,
    pub unreachable: u64,
    pub other: u64,
}

/// One band of the response-time histogram; bands keep their fixed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    pub label: String,
    pub count: u64,
}

/// Quality verdict derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Quality::Excellent => "Excellent",
            Quality::Good => "Good",
            Quality::Fair => "Fair",
            Quality::Poor => "Poor",
            Quality::Critical => "Critical",
        };
        f.write_str(s)
    }
}

/// Complete analysis of one transcript. Built fresh per invocation; the
/// latency and sequence-number vectors are owned snapshots, never views into
/// caller storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_packets: u64,
    pub successful_packets: u64,
    pub failed_packets: u64,

    pub latency: LatencyStats,

    /// Rates in percent; all 0 when `total_packets` is 0.
    pub success_rate: f64,
    pub failure_rate: f64,
    pub timeout_rate: f64,
    pub unreachable_rate: f64,
    pub packet_loss: f64,

    pub jitter_ms: Option<f64>,
    pub consistency: f64,

    pub streaks: StreakSummary,
    pub errors: ErrorCounts,

    pub response_times: Vec<f64>,
    pub sequence_numbers: Vec<u64>,
    pub time_distribution: Vec<TimeBucket>,

    pub quality_score: f64,
    pub quality: Quality,
    pub is_stable: bool,
    pub recommendation: String,
}

/// Events emitted by the probe engine and consumed by the CLI layer.
#[derive(Debug, Clone)]
pub enum ProbeEvent {
    Entry(PingEntry),
    Info(InfoEvent),
}

/// Structured status messages from the engine.
#[derive(Debug, Clone)]
pub enum InfoEvent {
    Message(String),
    ProbeStarted { host: String, args: Vec<String> },
}

impl InfoEvent {
    /// Render a human-readable message for the CLI layer.
    pub fn to_message(&self) -> String {
        match self {
            InfoEvent::Message(msg) => msg.clone(),
            InfoEvent::ProbeStarted { host, args } => {
                format!("Probing {} (ping {})", host, args.join(" "))
            }
        }
    }
}

/// Everything one run produced, shaped for lossless JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    #[serde(default)]
    pub timestamp_utc: String,
    pub host: String,
    /// Wall-clock run duration, human formatted (e.g. "1m 12s").
    pub duration: String,
    pub config: RunConfig,
    pub analysis: AnalysisReport,
    pub entries: Vec<PingEntry>,
}
