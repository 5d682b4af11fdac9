//! Read-only view over one learner's completed sessions.

use chrono::NaiveDate;

use crate::types::StudySession;

/// Date-ordered materialization of the completed sessions for one
/// learner/topic pair (or all topics of a learner).
///
/// Incomplete sessions are dropped at construction; they never contribute
/// to streak or mastery calculations. The view is immutable and can be
/// iterated any number of times.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    sessions: Vec<StudySession>,
}

impl SessionHistory {
    /// Build the view: keep completed sessions only, ordered ascending by
    /// session date. Accepts sessions in any order.
    pub fn new(mut sessions: Vec<StudySession>) -> Self {
        sessions.retain(|s| s.completed);
        sessions.sort_by_key(|s| s.session_date);
        Self { sessions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudySession> {
        self.sessions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Number of completed sessions.
    pub fn total_sessions(&self) -> u32 {
        self.sessions.len() as u32
    }

    /// Total completed study time in minutes.
    pub fn total_study_time_minutes(&self) -> u32 {
        self.sessions.iter().map(|s| s.duration_minutes).sum()
    }

    /// Mean of `confidence_after - confidence_before`, 0.0 with no sessions.
    pub fn average_confidence_gain(&self) -> f64 {
        if self.sessions.is_empty() {
            return 0.0;
        }
        let total: i32 = self.sessions.iter().map(|s| s.confidence_gain()).sum();
        f64::from(total) / self.sessions.len() as f64
    }

    /// Date of the most recent completed session.
    pub fn last_session_date(&self) -> Option<NaiveDate> {
        self.sessions.last().map(|s| s.session_date)
    }

    /// Distinct session dates, ascending. Multiple sessions on one day
    /// collapse to a single date.
    pub fn distinct_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.sessions.iter().map(|s| s.session_date).collect();
        dates.dedup();
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session(d: NaiveDate, minutes: i64, before: i32, after: i32, completed: bool) -> StudySession {
        StudySession::new(d, minutes, before, after, completed).unwrap()
    }

    #[test]
    fn empty_history_has_defaults() {
        let history = SessionHistory::new(vec![]);
        assert!(history.is_empty());
        assert_eq!(history.total_sessions(), 0);
        assert_eq!(history.total_study_time_minutes(), 0);
        assert_eq!(history.average_confidence_gain(), 0.0);
        assert_eq!(history.last_session_date(), None);
    }

    #[test]
    fn incomplete_sessions_are_dropped() {
        let history = SessionHistory::new(vec![
            session(date(2024, 1, 1), 30, 4, 6, true),
            session(date(2024, 1, 2), 45, 4, 6, false),
        ]);
        assert_eq!(history.total_sessions(), 1);
        assert_eq!(history.last_session_date(), Some(date(2024, 1, 1)));
    }

    #[test]
    fn sessions_are_ordered_by_date() {
        let history = SessionHistory::new(vec![
            session(date(2024, 1, 3), 30, 4, 6, true),
            session(date(2024, 1, 1), 30, 4, 6, true),
            session(date(2024, 1, 2), 30, 4, 6, true),
        ]);
        let dates: Vec<NaiveDate> = history.iter().map(|s| s.session_date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]
        );
    }

    #[test]
    fn iteration_is_restartable() {
        let history = SessionHistory::new(vec![session(date(2024, 1, 1), 30, 4, 6, true)]);
        assert_eq!(history.iter().count(), 1);
        assert_eq!(history.iter().count(), 1);
    }

    #[test]
    fn aggregates_cover_completed_sessions_only() {
        let history = SessionHistory::new(vec![
            session(date(2024, 1, 1), 30, 4, 6, true),
            session(date(2024, 1, 2), 60, 5, 9, true),
            session(date(2024, 1, 3), 90, 1, 10, false),
        ]);
        assert_eq!(history.total_study_time_minutes(), 90);
        assert_eq!(history.average_confidence_gain(), 3.0);
    }

    #[test]
    fn distinct_dates_collapse_same_day_sessions() {
        let history = SessionHistory::new(vec![
            session(date(2024, 1, 1), 30, 4, 6, true),
            session(date(2024, 1, 1), 20, 5, 7, true),
            session(date(2024, 1, 2), 30, 4, 6, true),
        ]);
        assert_eq!(
            history.distinct_dates(),
            vec![date(2024, 1, 1), date(2024, 1, 2)]
        );
    }
}
