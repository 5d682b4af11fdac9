//! Analytics recomputation and study plan assembly.
//!
//! The stored mastery record is a cache: every computation here starts
//! from the full session history so backfills and out-of-order inserts
//! can never leave the derived fields drifting.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use study_core::{mastery, planner, streak, SessionHistory, StudySession, TopicSnapshot};
use study_core::{MasteryRecord, PlanEntry};

use crate::db::Database;
use crate::error::Result;
use crate::models::{DbMasteryRecord, DbStudySession};

/// Build the session history view from stored rows.
pub fn session_history(rows: &[DbStudySession]) -> Result<SessionHistory> {
    let sessions = rows
        .iter()
        .map(|row| row.to_core_session())
        .collect::<std::result::Result<Vec<StudySession>, _>>()?;
    Ok(SessionHistory::new(sessions))
}

/// Load the history view for one learner/topic pair.
pub async fn topic_history(
    db: &Database,
    learner_id: Uuid,
    topic_id: i64,
) -> Result<SessionHistory> {
    let rows = db.get_sessions(learner_id, Some(topic_id)).await?;
    session_history(&rows)
}

/// Recompute the mastery record for one topic from its full history,
/// persist it, and emit the update notification.
pub async fn recompute_mastery(
    db: &Database,
    learner_id: Uuid,
    topic_id: i64,
    today: NaiveDate,
) -> Result<MasteryRecord> {
    let history = topic_history(db, learner_id, topic_id).await?;
    let record = mastery::recompute_record(&history, today);

    db.upsert_mastery_record(&DbMasteryRecord::from_core(learner_id, topic_id, &record))
        .await?;

    tracing::info!(
        %learner_id,
        topic_id,
        mastery_level = record.mastery_level.to_value(),
        current_streak = record.current_streak,
        next_recommended_date = %record.next_recommended_date,
        "mastery record updated"
    );

    Ok(record)
}

/// Assemble the ranked study plan across all of a learner's active topics.
pub async fn build_study_plan(
    db: &Database,
    learner_id: Uuid,
    today: NaiveDate,
    days: u32,
) -> Result<Vec<PlanEntry>> {
    let topics = db.get_active_topics(learner_id).await?;
    let rows = db.get_sessions(learner_id, None).await?;

    let mut by_topic: HashMap<i64, Vec<StudySession>> = HashMap::new();
    for row in &rows {
        by_topic
            .entry(row.topic_id)
            .or_default()
            .push(row.to_core_session()?);
    }

    let snapshots: Vec<TopicSnapshot> = topics
        .iter()
        .map(|topic| {
            let history = SessionHistory::new(by_topic.remove(&topic.id).unwrap_or_default());
            TopicSnapshot {
                topic_id: topic.id,
                mastery_level: mastery::estimate_mastery(history.total_sessions()).level,
                current_streak: streak::current_streak(&history, today),
                last_session_date: history.last_session_date(),
                target_sessions_per_week: topic.target_sessions_per_week as u32,
            }
        })
        .collect();

    Ok(planner::build_plan(&snapshots, today, days))
}
