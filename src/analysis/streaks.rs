//! Success/failure streak analysis over the entry sequence.

use crate::model::{CurrentStreak, PingEntry, StreakKind, StreakSummary};

/// Single left-to-right pass tracking running and longest streaks.
///
/// The reported current streak is the run ending at the last entry, keyed to
/// that entry's own outcome. Empty input reports an empty success streak.
pub fn analyze_streaks(entries: &[PingEntry]) -> StreakSummary {
    let Some(last) = entries.last() else {
        return StreakSummary::default();
    };

    let mut longest_success = 0u64;
    let mut longest_failure = 0u64;
    let mut success_run = 0u64;
    let mut failure_run = 0u64;

    for entry in entries {
        if entry.is_success() {
            success_run += 1;
            longest_success = longest_success.max(success_run);
            failure_run = 0;
        } else {
            failure_run += 1;
            longest_failure = longest_failure.max(failure_run);
            success_run = 0;
        }
    }

    let current = if last.is_success() {
        CurrentStreak {
            kind: StreakKind::Success,
            count: success_run,
        }
    } else {
        CurrentStreak {
            kind: StreakKind::Failure,
            count: failure_run,
        }
    };

    StreakSummary {
        longest_success,
        longest_failure,
        current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ErrorKind;

    fn ok() -> PingEntry {
        PingEntry::success(None, 10.0, None, None)
    }

    fn fail() -> PingEntry {
        PingEntry::failure(ErrorKind::Timeout, None, None)
    }

    #[test]
    fn empty_input_reports_zero_success_streak() {
        let s = analyze_streaks(&[]);
        assert_eq!(s.longest_success, 0);
        assert_eq!(s.longest_failure, 0);
        assert_eq!(s.current.kind, StreakKind::Success);
        assert_eq!(s.current.count, 0);
    }

    #[test]
    fn tracks_longest_runs_independently() {
        let entries = vec![ok(), ok(), ok(), fail(), fail(), ok()];
        let s = analyze_streaks(&entries);
        assert_eq!(s.longest_success, 3);
        assert_eq!(s.longest_failure, 2);
        assert_eq!(s.current.kind, StreakKind::Success);
        assert_eq!(s.current.count, 1);
    }

    #[test]
    fn current_streak_follows_last_entry() {
        let entries = vec![ok(), fail(), fail()];
        let s = analyze_streaks(&entries);
        assert_eq!(s.current.kind, StreakKind::Failure);
        assert_eq!(s.current.count, 2);
    }

    #[test]
    fn alternating_outcomes_cap_streaks_at_one() {
        let entries = vec![ok(), fail(), ok(), fail()];
        let s = analyze_streaks(&entries);
        assert_eq!(s.longest_success, 1);
        assert_eq!(s.longest_failure, 1);
        assert_eq!(s.current.kind, StreakKind::Failure);
        assert_eq!(s.current.count, 1);
    }
}
