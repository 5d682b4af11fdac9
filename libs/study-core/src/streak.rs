//! Study streak calculation.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::history::SessionHistory;

/// Consecutive-day streak ending at `today`.
///
/// Walks backward from `today` one calendar day at a time and counts days
/// with at least one completed session, stopping at the first gap. A day
/// with no session on `today` itself means a streak of 0, regardless of
/// past history. Multiple sessions on the same day count once.
pub fn current_streak(history: &SessionHistory, today: NaiveDate) -> u32 {
    let dates: HashSet<NaiveDate> = history.iter().map(|s| s.session_date).collect();

    let mut streak = 0;
    let mut day = today;
    while dates.contains(&day) {
        streak += 1;
        day = match day.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
    }
    streak
}

/// Longest run of consecutive session days anywhere in the history.
pub fn longest_streak(history: &SessionHistory) -> u32 {
    let dates = history.distinct_dates();

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for date in dates {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StudySession;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn history_on(dates: &[NaiveDate]) -> SessionHistory {
        SessionHistory::new(
            dates
                .iter()
                .map(|d| StudySession::new(*d, 30, 4, 6, true).unwrap())
                .collect(),
        )
    }

    #[test]
    fn empty_history_has_zero_streak() {
        let history = SessionHistory::new(vec![]);
        assert_eq!(current_streak(&history, date(2024, 1, 3)), 0);
        assert_eq!(longest_streak(&history), 0);
    }

    #[test]
    fn three_consecutive_days_ending_today() {
        let history = history_on(&[date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
        assert_eq!(current_streak(&history, date(2024, 1, 3)), 3);
    }

    #[test]
    fn gap_before_today_resets_to_one() {
        // Sessions on Jan 1 and Jan 3 only; the Jan 2 gap means only
        // today counts.
        let history = history_on(&[date(2024, 1, 1), date(2024, 1, 3)]);
        assert_eq!(current_streak(&history, date(2024, 1, 3)), 1);
    }

    #[test]
    fn no_session_today_means_zero() {
        let history = history_on(&[date(2024, 1, 1), date(2024, 1, 2)]);
        assert_eq!(current_streak(&history, date(2024, 1, 3)), 0);
    }

    #[test]
    fn multiple_sessions_same_day_count_once() {
        let history = history_on(&[date(2024, 1, 2), date(2024, 1, 2), date(2024, 1, 3)]);
        assert_eq!(current_streak(&history, date(2024, 1, 3)), 2);
    }

    #[test]
    fn incomplete_sessions_break_the_chain() {
        let history = SessionHistory::new(vec![
            StudySession::new(date(2024, 1, 2), 30, 4, 6, false).unwrap(),
            StudySession::new(date(2024, 1, 3), 30, 4, 6, true).unwrap(),
        ]);
        assert_eq!(current_streak(&history, date(2024, 1, 3)), 1);
    }

    #[test]
    fn longest_streak_finds_past_run() {
        // A four-day run in the past beats the current two-day run.
        let history = history_on(&[
            date(2024, 1, 1),
            date(2024, 1, 2),
            date(2024, 1, 3),
            date(2024, 1, 4),
            date(2024, 1, 10),
            date(2024, 1, 11),
        ]);
        assert_eq!(longest_streak(&history), 4);
        assert_eq!(current_streak(&history, date(2024, 1, 11)), 2);
    }

    #[test]
    fn current_streak_never_exceeds_longest() {
        let history = history_on(&[
            date(2024, 1, 1),
            date(2024, 1, 2),
            date(2024, 1, 3),
        ]);
        let today = date(2024, 1, 3);
        assert!(current_streak(&history, today) <= longest_streak(&history));
    }

    #[test]
    fn streak_crosses_month_boundary() {
        let history = history_on(&[date(2024, 1, 31), date(2024, 2, 1)]);
        assert_eq!(current_streak(&history, date(2024, 2, 1)), 2);
    }
}
