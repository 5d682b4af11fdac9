//! Next-review scheduling.

use chrono::{Duration, NaiveDate};

use crate::types::MasteryLevel;

/// Date of the next recommended review.
///
/// Counts the review interval from the last session date, or from `today`
/// for a topic with no history so a freshly created topic is never flagged
/// overdue on day one.
pub fn next_review_date(
    last_session_date: Option<NaiveDate>,
    level: MasteryLevel,
    today: NaiveDate,
) -> NaiveDate {
    let base = last_session_date.unwrap_or(today);
    base + Duration::days(level.review_interval_days())
}
