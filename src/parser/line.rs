//! Single-line classifier for ping output.
//!
//! Recognizes the Unix/macOS response dialect, the Windows `Reply from`
//! dialect, and a loose fallback for anything carrying a `time=..ms` token,
//! plus timeout and unreachable failure lines. Everything else (banners,
//! summary blocks, hex dumps) is rejected.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ErrorKind, PingEntry};
use crate::parser::source_ip::extract_source_ip;

/// Compiled patterns for line classification, built once.
struct LinePatterns {
    /// Startup banners and summary/diagnostic lines that carry no probe data.
    skip: Vec<Regex>,
    /// Latency token in any dialect; overrides the skip list because some
    /// banners embed the first reading.
    time_token: Regex,
    /// Sequence number inside a timeout line: "icmp_seq 6511" or "icmp_seq=6511".
    timeout_seq: Regex,
    /// "64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=25.1 ms" (IPv4 or IPv6).
    unix_reply: Regex,
    /// "Reply from 8.8.8.8: bytes=32 time=1ms TTL=64" (`time<1ms` also matches).
    windows_reply: Regex,
    /// Loose extractors for the fallback dialect.
    fallback_time: Regex,
    fallback_ttl: Regex,
    fallback_seq: Regex,
}

impl LinePatterns {
    fn new() -> Self {
        Self {
            skip: vec![
                Regex::new(r"(?i)^PING\s.*\s+data$|^PING\s.*\s+bytes$").expect("invalid banner regex"),
                Regex::new(r"(?i)^---.*ping\s+statistics").expect("invalid statistics regex"),
                Regex::new(r"(?i)^\d+\s+packets\s+transmitted").expect("invalid transmitted regex"),
                Regex::new(r"(?i)^round-trip").expect("invalid round-trip regex"),
                Regex::new(r"(?i)^rtt").expect("invalid rtt regex"),
                Regex::new(r"(?i)^Vr\s+HL\s+TOS").expect("invalid proto header regex"),
                Regex::new(r"(?i)^\s*\d+\s+\d+\s+\d+\s+\d+").expect("invalid hex dump regex"),
                Regex::new(r"^\^C$").expect("invalid interrupt regex"),
            ],
            time_token: Regex::new(r"(?i)time[=<]?\s*[\d.]+\s*ms").expect("invalid time token regex"),
            timeout_seq: Regex::new(r"(?i)icmp_seq[=\s]+(\d+)").expect("invalid timeout seq regex"),
            unix_reply: Regex::new(
                r"(?i)(\d+)\s+bytes\s+from\s+([\d.:a-f]+):\s+icmp_seq[=:](\d+)\s+ttl[=:](\d+)\s+time[=:]\s*([\d.]+)\s*ms",
            )
            .expect("invalid unix reply regex"),
            windows_reply: Regex::new(
                r"(?i)Reply\s+from\s+([\d.]+):\s+bytes=\d+\s+time[=<](\d+)ms\s+TTL=(\d+)",
            )
            .expect("invalid windows reply regex"),
            fallback_time: Regex::new(r"(?i)time[=<:]?\s*([\d.]+)\s*ms").expect("invalid fallback time regex"),
            fallback_ttl: Regex::new(r"(?i)ttl[=:]\s*(\d+)").expect("invalid fallback ttl regex"),
            fallback_seq: Regex::new(r"(?i)(?:icmp_)?seq[=:]\s*(\d+)").expect("invalid fallback seq regex"),
        }
    }
}

static PATTERNS: LazyLock<LinePatterns> = LazyLock::new(LinePatterns::new);

/// Classify a single trimmed line of ping output.
///
/// Returns `None` for lines that carry no probe data; unparseable lines are
/// dropped silently, never reported as errors.
pub fn parse_line(line: &str) -> Option<PingEntry> {
    if is_non_probe_line(line) {
        return None;
    }

    let lower = line.to_lowercase();

    if lower.contains("timeout") {
        let sequence = PATTERNS
            .timeout_seq
            .captures(line)
            .and_then(|c| c.get(1)?.as_str().parse().ok());
        return Some(PingEntry::failure(ErrorKind::Timeout, sequence, None));
    }

    if lower.contains("unreachable") {
        return Some(PingEntry::failure(
            ErrorKind::Unreachable,
            None,
            extract_source_ip(line),
        ));
    }

    parse_success(line)
}

/// Header, summary, and dump lines that should vanish from the entry stream.
fn is_non_probe_line(line: &str) -> bool {
    if line.trim().is_empty() {
        return true;
    }
    // A latency token means probe data, even on a line that looks like a banner.
    if PATTERNS.time_token.is_match(line) {
        return false;
    }
    PATTERNS.skip.iter().any(|re| re.is_match(line))
}

/// Try the success dialects in fixed priority order; first match wins.
fn parse_success(line: &str) -> Option<PingEntry> {
    if let Some(caps) = PATTERNS.unix_reply.captures(line) {
        return Some(PingEntry::success(
            caps.get(3)?.as_str().parse().ok(),
            caps.get(5)?.as_str().parse().ok()?,
            caps.get(4)?.as_str().parse().ok(),
            Some(caps.get(2)?.as_str().to_string()),
        ));
    }

    if let Some(caps) = PATTERNS.windows_reply.captures(line) {
        // `time<1ms` reports a bound; the bound is still the best reading we have.
        // This dialect never prints a sequence number.
        return Some(PingEntry::success(
            None,
            caps.get(2)?.as_str().parse().ok()?,
            caps.get(3)?.as_str().parse().ok(),
            Some(caps.get(1)?.as_str().to_string()),
        ));
    }

    if let Some(caps) = PATTERNS.fallback_time.captures(line) {
        let time_ms: f64 = caps.get(1)?.as_str().parse().ok()?;
        let ttl = PATTERNS
            .fallback_ttl
            .captures(line)
            .and_then(|c| c.get(1)?.as_str().parse().ok());
        let sequence = PATTERNS
            .fallback_seq
            .captures(line)
            .and_then(|c| c.get(1)?.as_str().parse().ok());
        return Some(PingEntry::success(
            sequence,
            time_ms,
            ttl,
            extract_source_ip(line),
        ));
    }

    None
}
