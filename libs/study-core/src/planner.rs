//! Priority planning across all of a learner's active topics.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};

use crate::types::{MasteryLevel, PlanEntry, PriorityReason};

/// Per-topic inputs for the planner, taken from the recomputed analytics
/// of each active topic.
#[derive(Debug, Clone)]
pub struct TopicSnapshot {
    pub topic_id: i64,
    pub mastery_level: MasteryLevel,
    pub current_streak: u32,
    pub last_session_date: Option<NaiveDate>,
    pub target_sessions_per_week: u32,
}

/// Classify a topic into its priority bucket.
///
/// Rules are evaluated top to bottom; the first match wins.
pub fn classify(snapshot: &TopicSnapshot, today: NaiveDate) -> PriorityReason {
    let last = match snapshot.last_session_date {
        None => return PriorityReason::NeverStudied,
        Some(last) => last,
    };

    let days_since = (today - last).num_days();
    if days_since >= 7 {
        PriorityReason::Overdue
    } else if days_since >= 3 {
        PriorityReason::Lapsing
    } else if snapshot.mastery_level.to_value() <= 2 {
        PriorityReason::FoundationBuilding
    } else if snapshot.current_streak >= 3 {
        PriorityReason::MaintainingMomentum
    } else {
        PriorityReason::RegularReview
    }
}

/// Recommended session length by mastery level: novices and experts get
/// short touches, intermediate learners the longest deep-work sessions.
pub fn recommended_duration_minutes(level: MasteryLevel) -> u32 {
    match level {
        MasteryLevel::Novice | MasteryLevel::Expert => 30,
        MasteryLevel::Developing | MasteryLevel::Proficient => 45,
        MasteryLevel::Competent => 60,
    }
}

/// Build the study plan for the next `days` days.
///
/// Topics are ranked descending by priority score, ties broken by earliest
/// last-session date with never-studied topics first, then by topic id so
/// the ordering is deterministic for any fixed input. The top `days` topics
/// are assigned to consecutive calendar days starting at `today`.
pub fn build_plan(topics: &[TopicSnapshot], today: NaiveDate, days: u32) -> Vec<PlanEntry> {
    let mut ranked: Vec<(&TopicSnapshot, PriorityReason)> = topics
        .iter()
        .map(|t| (t, classify(t, today)))
        .collect();

    ranked.sort_by(|a, b| {
        b.1.score()
            .cmp(&a.1.score())
            .then_with(|| cmp_last_session(a.0.last_session_date, b.0.last_session_date))
            .then_with(|| a.0.topic_id.cmp(&b.0.topic_id))
    });

    ranked
        .into_iter()
        .take(days as usize)
        .enumerate()
        .map(|(offset, (topic, reason))| PlanEntry {
            date: today + Duration::days(offset as i64),
            topic_id: topic.topic_id,
            priority_score: reason.score(),
            recommended_duration_minutes: recommended_duration_minutes(topic.mastery_level),
            reason,
        })
        .collect()
}

// Earliest date first, never-studied (None) before any date.
fn cmp_last_session(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}
