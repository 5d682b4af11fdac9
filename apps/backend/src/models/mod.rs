//! Database models and API types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from study-core
pub use study_core::types::{MasteryLevel, MasteryRecord, PlanEntry, PriorityReason, StudySession};
use study_core::ValidationError;

// === Database Entity Types ===

/// Learner account scope for all stored rows
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Learner {
    pub id: Uuid,
    pub token: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Topic stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTopic {
    pub id: i64,
    pub learner_id: Uuid,
    pub name: String,
    pub target_sessions_per_week: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbTopic {
    /// Convert to API topic type
    pub fn to_api_topic(&self) -> ApiTopic {
        ApiTopic {
            id: self.id,
            name: self.name.clone(),
            target_sessions_per_week: self.target_sessions_per_week,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Study session fact stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStudySession {
    pub id: Uuid,
    pub learner_id: Uuid,
    pub topic_id: i64,
    pub session_date: NaiveDate,
    pub duration_minutes: i32,
    pub confidence_before: i16,
    pub confidence_after: i16,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl DbStudySession {
    /// Convert to the core session fact, re-checking the data contract.
    pub fn to_core_session(&self) -> Result<StudySession, ValidationError> {
        StudySession::new(
            self.session_date,
            i64::from(self.duration_minutes),
            i32::from(self.confidence_before),
            i32::from(self.confidence_after),
            self.completed,
        )
    }

    /// Convert to API session type
    pub fn to_api_session(&self) -> ApiSession {
        ApiSession {
            id: self.id,
            topic_id: self.topic_id,
            session_date: self.session_date,
            duration_minutes: self.duration_minutes,
            confidence_before: self.confidence_before,
            confidence_after: self.confidence_after,
            completed: self.completed,
        }
    }
}

/// Derived mastery record in PostgreSQL (cache of the recomputed analytics)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMasteryRecord {
    pub learner_id: Uuid,
    pub topic_id: i64,
    pub total_sessions: i32,
    pub total_study_time_minutes: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub average_confidence_gain: f64,
    pub last_session_date: Option<NaiveDate>,
    pub next_recommended_date: NaiveDate,
    pub mastery_level: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbMasteryRecord {
    /// Create from a recomputed core record
    pub fn from_core(learner_id: Uuid, topic_id: i64, record: &MasteryRecord) -> Self {
        Self {
            learner_id,
            topic_id,
            total_sessions: record.total_sessions as i32,
            total_study_time_minutes: record.total_study_time_minutes as i32,
            current_streak: record.current_streak as i32,
            longest_streak: record.longest_streak as i32,
            average_confidence_gain: record.average_confidence_gain,
            last_session_date: record.last_session_date,
            next_recommended_date: record.next_recommended_date,
            mastery_level: i16::from(record.mastery_level.to_value()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Convert to the core record
    pub fn to_core(&self) -> MasteryRecord {
        MasteryRecord {
            total_sessions: self.total_sessions.max(0) as u32,
            total_study_time_minutes: self.total_study_time_minutes.max(0) as u32,
            current_streak: self.current_streak.max(0) as u32,
            longest_streak: self.longest_streak.max(0) as u32,
            average_confidence_gain: self.average_confidence_gain,
            last_session_date: self.last_session_date,
            next_recommended_date: self.next_recommended_date,
            mastery_level: MasteryLevel::from_value(self.mastery_level as u8).unwrap_or_default(),
        }
    }
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerRegisterRequest {
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerRegisterResponse {
    pub learner_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerStatusResponse {
    pub learner_id: Uuid,
    pub last_seen_at: DateTime<Utc>,
}

// Topic types
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiTopic {
    pub id: i64,
    pub name: String,
    pub target_sessions_per_week: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicListResponse {
    pub topics: Vec<ApiTopic>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTopicRequest {
    pub name: String,
    pub target_sessions_per_week: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTopicRequest {
    pub name: Option<String>,
    pub target_sessions_per_week: Option<i32>,
    pub is_active: Option<bool>,
}

// Session types
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiSession {
    pub id: Uuid,
    pub topic_id: i64,
    pub session_date: NaiveDate,
    pub duration_minutes: i32,
    pub confidence_before: i16,
    pub confidence_after: i16,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionListQuery {
    pub topic_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<ApiSession>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogSessionRequest {
    pub topic_id: i64,
    pub session_date: NaiveDate,
    pub duration_minutes: i64,
    pub confidence_before: i32,
    pub confidence_after: i32,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogSessionResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub mastery: MasteryRecord,
}

// Analytics types
#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub topic_id: i64,
    pub current_streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MasteryResponse {
    pub topic_id: i64,
    pub mastery_level: u8,
    pub review_interval_days: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NextReviewResponse {
    pub topic_id: i64,
    pub next_review_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MasteryRecordResponse {
    pub topic_id: i64,
    #[serde(flatten)]
    pub record: MasteryRecord,
}

// Plan types
#[derive(Debug, Serialize, Deserialize)]
pub struct StudyPlanQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudyPlanResponse {
    pub days: u32,
    pub entries: Vec<PlanEntry>,
}
