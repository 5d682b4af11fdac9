//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Learner Repository ===

    /// Create a new learner with generated token
    pub async fn create_learner(&self, display_name: Option<&str>) -> Result<Learner> {
        let token = Uuid::new_v4().to_string();
        let learner = sqlx::query_as::<_, Learner>(
            r#"
            INSERT INTO learners (token, display_name)
            VALUES ($1, $2)
            RETURNING id, token, display_name, created_at, last_seen_at
            "#,
        )
        .bind(&token)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(learner)
    }

    /// Get learner by token
    pub async fn get_learner_by_token(&self, token: &str) -> Result<Option<Learner>> {
        let learner = sqlx::query_as::<_, Learner>(
            r#"
            SELECT id, token, display_name, created_at, last_seen_at
            FROM learners
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(learner)
    }

    /// Update learner last_seen_at timestamp
    pub async fn update_last_seen(&self, learner_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE learners
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(learner_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Topic Repository ===

    /// Create a topic for a learner
    pub async fn create_topic(
        &self,
        learner_id: Uuid,
        name: &str,
        target_sessions_per_week: i32,
    ) -> Result<DbTopic> {
        let topic = sqlx::query_as::<_, DbTopic>(
            r#"
            INSERT INTO topics (learner_id, name, target_sessions_per_week)
            VALUES ($1, $2, $3)
            RETURNING id, learner_id, name, target_sessions_per_week, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(learner_id)
        .bind(name)
        .bind(target_sessions_per_week)
        .fetch_one(&self.pool)
        .await?;

        Ok(topic)
    }

    /// Get a topic scoped to its owning learner
    pub async fn get_topic(&self, learner_id: Uuid, topic_id: i64) -> Result<Option<DbTopic>> {
        let topic = sqlx::query_as::<_, DbTopic>(
            r#"
            SELECT id, learner_id, name, target_sessions_per_week, is_active,
                   created_at, updated_at
            FROM topics
            WHERE id = $1 AND learner_id = $2
            "#,
        )
        .bind(topic_id)
        .bind(learner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(topic)
    }

    /// Get all topics for a learner
    pub async fn get_topics(&self, learner_id: Uuid) -> Result<Vec<DbTopic>> {
        let topics = sqlx::query_as::<_, DbTopic>(
            r#"
            SELECT id, learner_id, name, target_sessions_per_week, is_active,
                   created_at, updated_at
            FROM topics
            WHERE learner_id = $1
            ORDER BY id
            "#,
        )
        .bind(learner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(topics)
    }

    /// Get active topics for a learner (the only ones that schedule)
    pub async fn get_active_topics(&self, learner_id: Uuid) -> Result<Vec<DbTopic>> {
        let topics = sqlx::query_as::<_, DbTopic>(
            r#"
            SELECT id, learner_id, name, target_sessions_per_week, is_active,
                   created_at, updated_at
            FROM topics
            WHERE learner_id = $1 AND is_active = TRUE
            ORDER BY id
            "#,
        )
        .bind(learner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(topics)
    }

    /// Update topic name, weekly target, and active flag
    pub async fn update_topic(&self, topic: &DbTopic) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE topics
            SET name = $3,
                target_sessions_per_week = $4,
                is_active = $5,
                updated_at = NOW()
            WHERE id = $1 AND learner_id = $2
            "#,
        )
        .bind(topic.id)
        .bind(topic.learner_id)
        .bind(&topic.name)
        .bind(topic.target_sessions_per_week)
        .bind(topic.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Session Repository ===

    /// Insert a session fact
    pub async fn insert_session(&self, session: &DbStudySession) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO study_sessions (id, learner_id, topic_id, session_date,
                                        duration_minutes, confidence_before,
                                        confidence_after, completed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(session.id)
        .bind(session.learner_id)
        .bind(session.topic_id)
        .bind(session.session_date)
        .bind(session.duration_minutes)
        .bind(session.confidence_before)
        .bind(session.confidence_after)
        .bind(session.completed)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get sessions for a learner, optionally filtered by topic,
    /// ascending by session date
    pub async fn get_sessions(
        &self,
        learner_id: Uuid,
        topic_id: Option<i64>,
    ) -> Result<Vec<DbStudySession>> {
        let sessions = match topic_id {
            Some(topic_id) => {
                sqlx::query_as::<_, DbStudySession>(
                    r#"
                    SELECT id, learner_id, topic_id, session_date, duration_minutes,
                           confidence_before, confidence_after, completed, created_at
                    FROM study_sessions
                    WHERE learner_id = $1 AND topic_id = $2
                    ORDER BY session_date, created_at
                    "#,
                )
                .bind(learner_id)
                .bind(topic_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DbStudySession>(
                    r#"
                    SELECT id, learner_id, topic_id, session_date, duration_minutes,
                           confidence_before, confidence_after, completed, created_at
                    FROM study_sessions
                    WHERE learner_id = $1
                    ORDER BY session_date, created_at
                    "#,
                )
                .bind(learner_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(sessions)
    }

    // === Mastery Record Repository ===

    /// Upsert the derived mastery record for a learner/topic pair
    pub async fn upsert_mastery_record(&self, record: &DbMasteryRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO mastery_records (learner_id, topic_id, total_sessions,
                                         total_study_time_minutes, current_streak,
                                         longest_streak, average_confidence_gain,
                                         last_session_date, next_recommended_date,
                                         mastery_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (learner_id, topic_id) DO UPDATE SET
                total_sessions = EXCLUDED.total_sessions,
                total_study_time_minutes = EXCLUDED.total_study_time_minutes,
                current_streak = EXCLUDED.current_streak,
                longest_streak = EXCLUDED.longest_streak,
                average_confidence_gain = EXCLUDED.average_confidence_gain,
                last_session_date = EXCLUDED.last_session_date,
                next_recommended_date = EXCLUDED.next_recommended_date,
                mastery_level = EXCLUDED.mastery_level,
                updated_at = NOW()
            "#,
        )
        .bind(record.learner_id)
        .bind(record.topic_id)
        .bind(record.total_sessions)
        .bind(record.total_study_time_minutes)
        .bind(record.current_streak)
        .bind(record.longest_streak)
        .bind(record.average_confidence_gain)
        .bind(record.last_session_date)
        .bind(record.next_recommended_date)
        .bind(record.mastery_level)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the cached mastery record for a learner/topic pair
    pub async fn get_mastery_record(
        &self,
        learner_id: Uuid,
        topic_id: i64,
    ) -> Result<Option<DbMasteryRecord>> {
        let record = sqlx::query_as::<_, DbMasteryRecord>(
            r#"
            SELECT learner_id, topic_id, total_sessions, total_study_time_minutes,
                   current_streak, longest_streak, average_confidence_gain,
                   last_session_date, next_recommended_date, mastery_level,
                   created_at, updated_at
            FROM mastery_records
            WHERE learner_id = $1 AND topic_id = $2
            "#,
        )
        .bind(learner_id)
        .bind(topic_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
