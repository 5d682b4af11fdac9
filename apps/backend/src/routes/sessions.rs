//! Session logging endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use study_core::StudySession;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedLearner;
use crate::services::analytics;
use crate::AppState;

/// GET /api/sessions
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<SessionListResponse>> {
    let sessions = state
        .db
        .get_sessions(auth.learner_id, query.topic_id)
        .await?;

    Ok(Json(SessionListResponse {
        sessions: sessions.iter().map(|s| s.to_api_session()).collect(),
    }))
}

/// POST /api/sessions
/// Logs a study session, then recomputes the topic's mastery record
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Json(payload): Json<LogSessionRequest>,
) -> Result<Json<LogSessionResponse>> {
    // The topic must exist and belong to the caller
    let topic = state
        .db
        .get_topic(auth.learner_id, payload.topic_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Topic not found".to_string()))?;

    // Validate the fact at the ingestion boundary; the scheduling core
    // never clamps out-of-range values
    let session = StudySession::new(
        payload.session_date,
        payload.duration_minutes,
        payload.confidence_before,
        payload.confidence_after,
        payload.completed,
    )?;

    let db_session = DbStudySession {
        id: Uuid::new_v4(),
        learner_id: auth.learner_id,
        topic_id: topic.id,
        session_date: session.session_date,
        duration_minutes: session.duration_minutes as i32,
        confidence_before: i16::from(session.confidence_before),
        confidence_after: i16::from(session.confidence_after),
        completed: session.completed,
        created_at: Utc::now(),
    };
    state.db.insert_session(&db_session).await?;

    // Write-then-notify: the recompute persists the record and emits the
    // analytics-updated event
    let today = Utc::now().date_naive();
    let mastery =
        analytics::recompute_mastery(&state.db, auth.learner_id, topic.id, today).await?;

    Ok(Json(LogSessionResponse {
        session_id: db_session.id,
        mastery,
    }))
}
