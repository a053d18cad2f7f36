//! Parsing of raw ping output into structured entries.
//!
//! Handles the major platform dialects:
//! - Linux/macOS: `64 bytes from 8.8.8.8: icmp_seq=6521 ttl=117 time=220.874 ms`
//! - Windows: `Reply from 8.8.8.8: bytes=32 time=1ms TTL=64`
//! - Timeouts: `Request timeout for icmp_seq 6511`

mod line;
mod source_ip;

pub use line::parse_line;
pub use source_ip::extract_source_ip;

use crate::model::PingEntry;

/// Split a transcript into lines and classify each one.
///
/// Lines that carry no probe data vanish silently; entries come back in
/// arrival order.
pub fn parse_output(output: &str) -> Vec<PingEntry> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_transcript_keeps_arrival_order() {
        let output = "\
PING google.com (142.250.74.46): 56 data bytes
64 bytes from 142.250.74.46: icmp_seq=0 ttl=117 time=20.1 ms
Request timeout for icmp_seq 1
64 bytes from 142.250.74.46: icmp_seq=2 ttl=117 time=22.9 ms

--- google.com ping statistics ---
3 packets transmitted, 2 packets received, 33.3% packet loss
round-trip min/avg/max/stddev = 20.1/21.5/22.9/1.4 ms
";
        let entries = parse_output(output);
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_success());
        assert!(!entries[1].is_success());
        assert!(entries[2].is_success());
        assert_eq!(entries[2].sequence, Some(2));
    }

    #[test]
    fn windows_transcript() {
        let output = "\
Pinging 8.8.8.8 with 32 bytes of data:
Reply from 8.8.8.8: bytes=32 time=14ms TTL=117
Reply from 8.8.8.8: bytes=32 time=15ms TTL=117
";
        let entries = parse_output(output);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].time_ms(), Some(14.0));
        assert_eq!(entries[1].time_ms(), Some(15.0));
    }

    #[test]
    fn empty_and_garbage_input_yield_no_entries() {
        assert!(parse_output("").is_empty());
        assert!(parse_output("\n\n   \n").is_empty());
        assert!(parse_output("not a ping line\nnor this one").is_empty());
    }
}
