//! Core scheduling and mastery engine shared by the backend service.
//!
//! Provides:
//! - Session history view over a learner's completed sessions
//! - Streak calculation (consecutive study days ending today)
//! - Mastery estimation with the fixed spaced-repetition interval table
//! - Next-review scheduling
//! - Priority planning across all active topics
//!
//! Everything here is a pure function of its inputs; "today" is always an
//! explicit parameter and no component performs I/O.

pub mod error;
pub mod history;
pub mod mastery;
pub mod planner;
pub mod scheduler;
pub mod streak;
pub mod types;

pub use error::{Result, ValidationError};
pub use history::SessionHistory;
pub use mastery::{estimate_mastery, recompute_record, MasteryEstimate};
pub use planner::{build_plan, classify, recommended_duration_minutes, TopicSnapshot};
pub use scheduler::next_review_date;
pub use streak::{current_streak, longest_streak};
pub use types::{MasteryLevel, MasteryRecord, PlanEntry, PriorityReason, StudySession};
