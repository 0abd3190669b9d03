#![forbid(unsafe_code)]

pub mod certificates;
pub mod error;
pub mod identity;
pub mod player;

pub use certificates::CertificateService;
pub use error::{CertificateError, CourseLoadError, PlayerSessionError};
pub use identity::SessionIdentity;
pub use player::{
    PlayerLoopService, PlayerProgress, PlayerSession, QuizAttempt, DEFAULT_SCORE_REVIEW_DELAY,
};
