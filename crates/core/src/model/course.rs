use thiserror::Error;

use crate::model::ids::{CourseId, LessonId};
use crate::model::quiz::Quiz;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("lesson title cannot be empty")]
    EmptyLessonTitle,

    #[error("course must contain at least one lesson")]
    NoLessons,

    #[error("progress must be 0..=100, got {got}")]
    InvalidProgress { got: u8 },

    #[error("a completed course must be at 100 percent, got {got}")]
    IncompleteAtFullMark { got: u8 },
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// One unit of course content, optionally gated by a quiz.
///
/// Immutable once loaded; the duration label is display-only and carried
/// verbatim from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    duration: String,
    body: String,
    quiz: Option<Quiz>,
}

impl Lesson {
    /// Creates a new lesson.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyLessonTitle` if the title is empty or
    /// whitespace-only.
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        duration: impl Into<String>,
        body: impl Into<String>,
        quiz: Option<Quiz>,
    ) -> Result<Self, CourseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseError::EmptyLessonTitle);
        }

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            duration: duration.into(),
            body: body.into(),
            quiz,
        })
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    #[must_use]
    pub fn has_quiz(&self) -> bool {
        self.quiz.is_some()
    }
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// An ordered sequence of lessons plus the learner's derived progress.
///
/// Lesson order is semantically meaningful: it is the only valid traversal
/// order. `progress`/`completed` are the personalized values the backend
/// merged into the fetch response, or zero/false for a fresh course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: String,
    lessons: Vec<Lesson>,
    progress: u8,
    completed: bool,
}

impl Course {
    /// Creates a course with no recorded progress.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the title is empty or no lessons are given.
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        lessons: Vec<Lesson>,
    ) -> Result<Self, CourseError> {
        Self::from_persisted(id, title, lessons, 0, false)
    }

    /// Rehydrates a course carrying personalized progress from the backend.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the title is empty, no lessons are given,
    /// `progress` exceeds 100, or `completed` is set below 100 percent.
    pub fn from_persisted(
        id: CourseId,
        title: impl Into<String>,
        lessons: Vec<Lesson>,
        progress: u8,
        completed: bool,
    ) -> Result<Self, CourseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        if lessons.is_empty() {
            return Err(CourseError::NoLessons);
        }
        if progress > 100 {
            return Err(CourseError::InvalidProgress { got: progress });
        }
        if completed && progress != 100 {
            return Err(CourseError::IncompleteAtFullMark { got: progress });
        }

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            lessons,
            progress,
            completed,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> CourseId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn lesson(&self, index: usize) -> Option<&Lesson> {
        self.lessons.get(index)
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::quiz::Question;

    fn build_lesson(id: u64, quiz: Option<Quiz>) -> Lesson {
        Lesson::new(LessonId::new(id), format!("Lesson {id}"), "5 min", "body", quiz).unwrap()
    }

    fn build_quiz() -> Quiz {
        Quiz::new(vec![
            Question::new("Q", vec!["a".into(), "b".into()], 0).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn lesson_rejects_empty_title() {
        let err = Lesson::new(LessonId::new(1), "  ", "5 min", "body", None).unwrap_err();
        assert_eq!(err, CourseError::EmptyLessonTitle);
    }

    #[test]
    fn lesson_reports_quiz_presence() {
        assert!(!build_lesson(1, None).has_quiz());
        assert!(build_lesson(2, Some(build_quiz())).has_quiz());
    }

    #[test]
    fn course_new_happy_path() {
        let course = Course::new(
            CourseId::new(7),
            "  Risk Management 101  ",
            vec![build_lesson(1, None), build_lesson(2, None)],
        )
        .unwrap();

        assert_eq!(course.id(), CourseId::new(7));
        assert_eq!(course.title(), "Risk Management 101");
        assert_eq!(course.lesson_count(), 2);
        assert_eq!(course.progress(), 0);
        assert!(!course.completed());
    }

    #[test]
    fn course_rejects_empty_title() {
        let err = Course::new(CourseId::new(1), "   ", vec![build_lesson(1, None)]).unwrap_err();
        assert_eq!(err, CourseError::EmptyTitle);
    }

    #[test]
    fn course_rejects_empty_lesson_list() {
        let err = Course::new(CourseId::new(1), "Title", Vec::new()).unwrap_err();
        assert_eq!(err, CourseError::NoLessons);
    }

    #[test]
    fn course_rejects_progress_over_100() {
        let err =
            Course::from_persisted(CourseId::new(1), "Title", vec![build_lesson(1, None)], 120, false)
                .unwrap_err();
        assert_eq!(err, CourseError::InvalidProgress { got: 120 });
    }

    #[test]
    fn course_rejects_completed_below_full_mark() {
        let err =
            Course::from_persisted(CourseId::new(1), "Title", vec![build_lesson(1, None)], 67, true)
                .unwrap_err();
        assert_eq!(err, CourseError::IncompleteAtFullMark { got: 67 });
    }

    #[test]
    fn course_from_persisted_keeps_personalized_progress() {
        let course =
            Course::from_persisted(CourseId::new(1), "Title", vec![build_lesson(1, None)], 100, true)
                .unwrap();
        assert_eq!(course.progress(), 100);
        assert!(course.completed());
    }

    #[test]
    fn course_lesson_lookup_by_index() {
        let course = Course::new(
            CourseId::new(1),
            "Title",
            vec![build_lesson(1, None), build_lesson(2, None)],
        )
        .unwrap();

        assert_eq!(course.lesson(1).unwrap().id(), LessonId::new(2));
        assert!(course.lesson(2).is_none());
    }
}
