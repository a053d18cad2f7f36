//! Failure tallies by error kind.

use crate::model::{ErrorCounts, ErrorKind, PingEntry};

/// Count failure entries by kind. Pure tally, no thresholds.
pub fn categorize_errors(entries: &[PingEntry]) -> ErrorCounts {
    let mut counts = ErrorCounts::default();
    for entry in entries {
        match entry.error_kind() {
            Some(ErrorKind::Timeout) => counts.timeouts += 1,
            Some(ErrorKind::Unreachable) => counts.unreachable += 1,
            Some(ErrorKind::Other) => counts.other += 1,
            None => {}
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_each_kind() {
        let entries = vec![
            PingEntry::success(None, 12.0, None, None),
            PingEntry::failure(ErrorKind::Timeout, None, None),
            PingEntry::failure(ErrorKind::Timeout, None, None),
            PingEntry::failure(ErrorKind::Unreachable, None, None),
            PingEntry::failure(ErrorKind::Other, None, None),
        ];
        let counts = categorize_errors(&entries);
        assert_eq!(counts.timeouts, 2);
        assert_eq!(counts.unreachable, 1);
        assert_eq!(counts.other, 1);
    }

    #[test]
    fn successes_do_not_count() {
        let entries = vec![PingEntry::success(Some(1), 5.0, Some(64), None)];
        assert_eq!(categorize_errors(&entries), ErrorCounts::default());
    }
}
