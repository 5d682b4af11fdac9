//! Topic endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedLearner;
use crate::AppState;

/// GET /api/topics
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
) -> Result<Json<TopicListResponse>> {
    let topics = state.db.get_topics(auth.learner_id).await?;
    Ok(Json(TopicListResponse {
        topics: topics.iter().map(|t| t.to_api_topic()).collect(),
    }))
}

/// POST /api/topics
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Json(payload): Json<CreateTopicRequest>,
) -> Result<Json<ApiTopic>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Topic name must not be empty".to_string()));
    }

    let target = payload.target_sessions_per_week.unwrap_or(3);
    if target < 1 {
        return Err(ApiError::BadRequest(
            "target_sessions_per_week must be at least 1".to_string(),
        ));
    }

    let topic = state.db.create_topic(auth.learner_id, name, target).await?;

    tracing::info!(learner_id = %auth.learner_id, topic_id = topic.id, "Created topic");

    Ok(Json(topic.to_api_topic()))
}

/// GET /api/topics/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Path(topic_id): Path<i64>,
) -> Result<Json<ApiTopic>> {
    let topic = state
        .db
        .get_topic(auth.learner_id, topic_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Topic not found".to_string()))?;

    Ok(Json(topic.to_api_topic()))
}

/// PUT /api/topics/:id
/// Renames, retargets, or archives a topic
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Path(topic_id): Path<i64>,
    Json(request): Json<UpdateTopicRequest>,
) -> Result<Json<ApiTopic>> {
    let mut topic = state
        .db
        .get_topic(auth.learner_id, topic_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Topic not found".to_string()))?;

    if let Some(name) = request.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::BadRequest("Topic name must not be empty".to_string()));
        }
        topic.name = name;
    }
    if let Some(target) = request.target_sessions_per_week {
        if target < 1 {
            return Err(ApiError::BadRequest(
                "target_sessions_per_week must be at least 1".to_string(),
            ));
        }
        topic.target_sessions_per_week = target;
    }
    if let Some(is_active) = request.is_active {
        topic.is_active = is_active;
    }

    state.db.update_topic(&topic).await?;

    Ok(Json(topic.to_api_topic()))
}
