//! Core types for the study scheduling engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One logged study event with before/after confidence ratings.
///
/// Sessions are immutable facts; corrections are logged as new sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub session_date: NaiveDate,
    pub duration_minutes: u32,
    pub confidence_before: u8,
    pub confidence_after: u8,
    pub completed: bool,
}

impl StudySession {
    /// Build a session from wide integer inputs, rejecting contract
    /// violations (confidence outside [1,10], negative duration).
    pub fn new(
        session_date: NaiveDate,
        duration_minutes: i64,
        confidence_before: i32,
        confidence_after: i32,
        completed: bool,
    ) -> Result<Self, ValidationError> {
        if !(1..=10).contains(&confidence_before) {
            return Err(ValidationError::ConfidenceBeforeOutOfRange {
                value: confidence_before,
            });
        }
        if !(1..=10).contains(&confidence_after) {
            return Err(ValidationError::ConfidenceAfterOutOfRange {
                value: confidence_after,
            });
        }
        let duration_minutes = u32::try_from(duration_minutes)
            .map_err(|_| ValidationError::NegativeDuration {
                minutes: duration_minutes,
            })?;

        Ok(Self {
            session_date,
            duration_minutes,
            confidence_before: confidence_before as u8,
            confidence_after: confidence_after as u8,
            completed,
        })
    }

    /// Confidence delta for this session (may be negative).
    pub fn confidence_gain(&self) -> i32 {
        i32::from(self.confidence_after) - i32::from(self.confidence_before)
    }
}

/// Mastery level summarizing how well-practiced a topic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryLevel {
    Novice,
    Developing,
    Competent,
    Proficient,
    Expert,
}

impl MasteryLevel {
    /// Convert to numeric value (1-5).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Novice => 1,
            Self::Developing => 2,
            Self::Competent => 3,
            Self::Proficient => 4,
            Self::Expert => 5,
        }
    }

    /// Create from numeric value (1-5).
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Novice),
            2 => Some(Self::Developing),
            3 => Some(Self::Competent),
            4 => Some(Self::Proficient),
            5 => Some(Self::Expert),
            _ => None,
        }
    }

    /// Days until the next review at this level.
    ///
    /// The spaced-repetition table is fixed; stored levels depend on it
    /// staying exactly as is.
    pub fn review_interval_days(self) -> i64 {
        match self {
            Self::Novice => 1,
            Self::Developing => 3,
            Self::Competent => 7,
            Self::Proficient => 14,
            Self::Expert => 30,
        }
    }
}

impl Default for MasteryLevel {
    fn default() -> Self {
        Self::Novice
    }
}

/// Derived analytics for one learner/topic pair.
///
/// Always recomputed from the full session history; the stored copy is a
/// cache, not a source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryRecord {
    pub total_sessions: u32,
    pub total_study_time_minutes: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub average_confidence_gain: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_session_date: Option<NaiveDate>,
    pub next_recommended_date: NaiveDate,
    pub mastery_level: MasteryLevel,
}

/// Why a topic was placed in the study plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityReason {
    NeverStudied,
    Overdue,
    Lapsing,
    FoundationBuilding,
    MaintainingMomentum,
    RegularReview,
}

impl PriorityReason {
    /// Priority score associated with this reason.
    pub fn score(self) -> u8 {
        match self {
            Self::NeverStudied => 100,
            Self::Overdue => 90,
            Self::Lapsing => 70,
            Self::FoundationBuilding => 60,
            Self::MaintainingMomentum => 40,
            Self::RegularReview => 50,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NeverStudied => "never studied",
            Self::Overdue => "overdue",
            Self::Lapsing => "lapsing",
            Self::FoundationBuilding => "foundation building",
            Self::MaintainingMomentum => "maintaining momentum",
            Self::RegularReview => "regular review",
        }
    }
}

/// One scheduled slot in a study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub date: NaiveDate,
    pub topic_id: i64,
    pub priority_score: u8,
    pub recommended_duration_minutes: u32,
    pub reason: PriorityReason,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn session_accepts_full_confidence_range() {
        for value in 1..=10 {
            let session = StudySession::new(date(2024, 1, 1), 30, value, value, true);
            assert!(session.is_ok(), "confidence {} should be valid", value);
        }
    }

    #[test]
    fn session_rejects_confidence_before_out_of_range() {
        let err = StudySession::new(date(2024, 1, 1), 30, 0, 5, true).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ConfidenceBeforeOutOfRange { value: 0 }
        );

        let err = StudySession::new(date(2024, 1, 1), 30, 11, 5, true).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ConfidenceBeforeOutOfRange { value: 11 }
        );
    }

    #[test]
    fn session_rejects_confidence_after_out_of_range() {
        let err = StudySession::new(date(2024, 1, 1), 30, 5, -3, true).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ConfidenceAfterOutOfRange { value: -3 }
        );
    }

    #[test]
    fn session_rejects_negative_duration() {
        let err = StudySession::new(date(2024, 1, 1), -15, 5, 5, true).unwrap_err();
        assert_eq!(err, ValidationError::NegativeDuration { minutes: -15 });
    }

    #[test]
    fn session_allows_zero_duration() {
        let session = StudySession::new(date(2024, 1, 1), 0, 5, 5, true).unwrap();
        assert_eq!(session.duration_minutes, 0);
    }

    #[test]
    fn confidence_gain_may_be_negative() {
        let session = StudySession::new(date(2024, 1, 1), 30, 8, 6, true).unwrap();
        assert_eq!(session.confidence_gain(), -2);
    }

    #[test]
    fn mastery_level_round_trips_through_value() {
        for value in 1..=5 {
            let level = MasteryLevel::from_value(value).unwrap();
            assert_eq!(level.to_value(), value);
        }
        assert_eq!(MasteryLevel::from_value(0), None);
        assert_eq!(MasteryLevel::from_value(6), None);
    }

    #[test]
    fn review_interval_table_is_fixed() {
        assert_eq!(MasteryLevel::Novice.review_interval_days(), 1);
        assert_eq!(MasteryLevel::Developing.review_interval_days(), 3);
        assert_eq!(MasteryLevel::Competent.review_interval_days(), 7);
        assert_eq!(MasteryLevel::Proficient.review_interval_days(), 14);
        assert_eq!(MasteryLevel::Expert.review_interval_days(), 30);
    }

    #[test]
    fn priority_scores_match_rules() {
        assert_eq!(PriorityReason::NeverStudied.score(), 100);
        assert_eq!(PriorityReason::Overdue.score(), 90);
        assert_eq!(PriorityReason::Lapsing.score(), 70);
        assert_eq!(PriorityReason::FoundationBuilding.score(), 60);
        assert_eq!(PriorityReason::MaintainingMomentum.score(), 40);
        assert_eq!(PriorityReason::RegularReview.score(), 50);
    }
}
