//! Mastery estimation and full-record recomputation.

use chrono::NaiveDate;

use crate::history::SessionHistory;
use crate::scheduler;
use crate::streak;
use crate::types::{MasteryLevel, MasteryRecord};

/// Mastery level with its derived review interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasteryEstimate {
    pub level: MasteryLevel,
    pub review_interval_days: i64,
}

/// Estimate mastery from the completed-session count.
///
/// Level = clamp(1 + total_sessions / 10, 1, 5). Confidence gain is kept
/// as informational telemetry on the record and does not move the level.
pub fn estimate_mastery(total_sessions: u32) -> MasteryEstimate {
    let raw = 1 + total_sessions / 10;
    let level = MasteryLevel::from_value(raw.min(5) as u8).unwrap_or(MasteryLevel::Expert);
    MasteryEstimate {
        level,
        review_interval_days: level.review_interval_days(),
    }
}

/// Recompute the full mastery record from the session history view.
///
/// The record is a pure function of the history and `today`; callers treat
/// any stored copy as a cache. Recomputing twice over the same history
/// yields identical output.
pub fn recompute_record(history: &SessionHistory, today: NaiveDate) -> MasteryRecord {
    let estimate = estimate_mastery(history.total_sessions());
    let last_session_date = history.last_session_date();

    MasteryRecord {
        total_sessions: history.total_sessions(),
        total_study_time_minutes: history.total_study_time_minutes(),
        current_streak: streak::current_streak(history, today),
        longest_streak: streak::longest_streak(history),
        average_confidence_gain: history.average_confidence_gain(),
        last_session_date,
        next_recommended_date: scheduler::next_review_date(
            last_session_date,
            estimate.level,
            today,
        ),
        mastery_level: estimate.level,
    }
}
