//! Source-IP extraction shared by the success-fallback and unreachable paths.

use std::sync::LazyLock;

use regex::Regex;

struct IpPatterns {
    /// IP literal in parentheses, the DNS-resolved-name form.
    parenthesized: Regex,
    /// IPv4 literal directly after "from"/"From".
    v4_after_from: Regex,
    /// IPv6 literal (colon-containing) directly after "from"/"From".
    v6_after_from: Regex,
}

static PATTERNS: LazyLock<IpPatterns> = LazyLock::new(|| IpPatterns {
    parenthesized: Regex::new(r"(?i)\(([\d.:a-f]+)\)").expect("invalid paren ip regex"),
    v4_after_from: Regex::new(r"(?:from|From)\s+([\d.]+)").expect("invalid v4 ip regex"),
    v6_after_from: Regex::new(r"(?i)(?:from|From)\s+([\da-f:]+:[\da-f:]*)").expect("invalid v6 ip regex"),
});

/// Pull a source IP out of a ping line; first matching form wins.
///
/// The captured text is not validated beyond its literal shape.
pub fn extract_source_ip(line: &str) -> Option<String> {
    for re in [
        &PATTERNS.parenthesized,
        &PATTERNS.v4_after_from,
        &PATTERNS.v6_after_from,
    ] {
        if let Some(caps) = re.captures(line) {
            return Some(caps[1].to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_parenthesized_ip() {
        let ip = extract_source_ip("64 bytes from dns.google (8.8.8.8): icmp_seq=1 ttl=117");
        assert_eq!(ip.as_deref(), Some("8.8.8.8"));
    }

    #[test]
    fn ipv4_after_from() {
        let ip = extract_source_ip("Reply from 192.168.0.254: bytes=32");
        assert_eq!(ip.as_deref(), Some("192.168.0.254"));
    }

    #[test]
    fn ipv6_after_from() {
        let ip = extract_source_ip("64 bytes from fe80::1 icmp_seq=1");
        assert_eq!(ip.as_deref(), Some("fe80::1"));
    }

    #[test]
    fn no_ip_yields_none() {
        assert!(extract_source_ip("Request timeout for icmp_seq 3").is_none());
    }
}
