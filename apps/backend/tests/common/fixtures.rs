//! Test fixtures and factory functions for creating test data.

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

/// Create a learner register request body.
pub fn learner_register_request(display_name: Option<&str>) -> serde_json::Value {
    match display_name {
        Some(n) => json!({ "display_name": n }),
        None => json!({}),
    }
}

/// Create a topic create request body.
pub fn create_topic_request(name: &str, target_sessions_per_week: Option<i32>) -> serde_json::Value {
    match target_sessions_per_week {
        Some(t) => json!({ "name": name, "target_sessions_per_week": t }),
        None => json!({ "name": name }),
    }
}

/// Create a session log request body.
pub fn log_session_request(
    topic_id: i64,
    session_date: NaiveDate,
    duration_minutes: i64,
    confidence_before: i32,
    confidence_after: i32,
) -> serde_json::Value {
    json!({
        "topic_id": topic_id,
        "session_date": session_date,
        "duration_minutes": duration_minutes,
        "confidence_before": confidence_before,
        "confidence_after": confidence_after,
        "completed": true
    })
}

/// Create a session log request for an incomplete session.
pub fn incomplete_session_request(topic_id: i64, session_date: NaiveDate) -> serde_json::Value {
    json!({
        "topic_id": topic_id,
        "session_date": session_date,
        "duration_minutes": 15,
        "confidence_before": 4,
        "confidence_after": 4,
        "completed": false
    })
}

/// Generate a unique topic name to avoid collisions between test runs.
pub fn unique_topic_name(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}
