mod progress;
mod service;
mod workflow;

// Public API of the course-player subsystem.
pub use crate::error::PlayerSessionError;
pub use progress::PlayerProgress;
pub use service::PlayerSession;
pub use workflow::{PlayerLoopService, QuizAttempt, DEFAULT_SCORE_REVIEW_DELAY};
