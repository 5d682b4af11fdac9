pub mod analytics;
pub mod auth;
pub mod learner;
pub mod sessions;
pub mod topics;
