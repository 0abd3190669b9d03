mod course;
mod ids;
mod progress;
mod quiz;

pub use course::{Course, CourseError, Lesson};
pub use ids::{CertificateNumber, CourseId, LessonId, UserId};
pub use progress::{percent_at, ProgressError, ProgressRecord, ProgressState};
pub use quiz::{Question, Quiz, QuizError};
