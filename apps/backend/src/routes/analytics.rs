//! Analytics and planning endpoints
//!
//! Reads recompute from the session history view; the stored mastery
//! record is only a cache written on the session-logging path.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;

use study_core::mastery::{estimate_mastery, recompute_record};
use study_core::streak::current_streak;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedLearner;
use crate::services::analytics;
use crate::AppState;

/// Default look-ahead window for study plans.
const DEFAULT_PLAN_DAYS: u32 = 7;

/// GET /api/topics/:id/streak
pub async fn streak(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Path(topic_id): Path<i64>,
) -> Result<Json<StreakResponse>> {
    require_topic(&state, &auth, topic_id).await?;

    let history = analytics::topic_history(&state.db, auth.learner_id, topic_id).await?;
    let today = Utc::now().date_naive();

    Ok(Json(StreakResponse {
        topic_id,
        current_streak: current_streak(&history, today),
    }))
}

/// GET /api/topics/:id/mastery
pub async fn mastery(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Path(topic_id): Path<i64>,
) -> Result<Json<MasteryResponse>> {
    require_topic(&state, &auth, topic_id).await?;

    let history = analytics::topic_history(&state.db, auth.learner_id, topic_id).await?;
    let estimate = estimate_mastery(history.total_sessions());

    Ok(Json(MasteryResponse {
        topic_id,
        mastery_level: estimate.level.to_value(),
        review_interval_days: estimate.review_interval_days,
    }))
}

/// GET /api/topics/:id/next-review
pub async fn next_review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Path(topic_id): Path<i64>,
) -> Result<Json<NextReviewResponse>> {
    require_topic(&state, &auth, topic_id).await?;

    let history = analytics::topic_history(&state.db, auth.learner_id, topic_id).await?;
    let today = Utc::now().date_naive();
    let record = recompute_record(&history, today);

    Ok(Json(NextReviewResponse {
        topic_id,
        next_review_date: record.next_recommended_date,
    }))
}

/// GET /api/topics/:id/record
pub async fn record(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Path(topic_id): Path<i64>,
) -> Result<Json<MasteryRecordResponse>> {
    require_topic(&state, &auth, topic_id).await?;

    let history = analytics::topic_history(&state.db, auth.learner_id, topic_id).await?;
    let today = Utc::now().date_naive();

    Ok(Json(MasteryRecordResponse {
        topic_id,
        record: recompute_record(&history, today),
    }))
}

/// GET /api/plan
pub async fn plan(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Query(query): Query<StudyPlanQuery>,
) -> Result<Json<StudyPlanResponse>> {
    let days = query.days.unwrap_or(DEFAULT_PLAN_DAYS);
    if days < 1 {
        return Err(ApiError::BadRequest("days must be at least 1".to_string()));
    }

    let today = Utc::now().date_naive();
    let entries = analytics::build_study_plan(&state.db, auth.learner_id, today, days).await?;

    Ok(Json(StudyPlanResponse { days, entries }))
}

async fn require_topic(
    state: &AppState,
    auth: &AuthenticatedLearner,
    topic_id: i64,
) -> Result<DbTopic> {
    state
        .db
        .get_topic(auth.learner_id, topic_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Topic not found".to_string()))
}
