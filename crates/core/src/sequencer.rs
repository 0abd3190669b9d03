//! Lesson ordering: the current-lesson pointer and the completion frontier.

use thiserror::Error;

use crate::evaluator::QuizScore;
use crate::model::Course;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SequencerError {
    #[error("lesson index {index} is out of range for {total} lessons")]
    OutOfRange { index: usize, total: usize },

    #[error("current lesson's quiz has not been passed")]
    QuizNotPassed,

    #[error("course is already completed")]
    CourseCompleted,
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Result of a successful advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the lesson at this index.
    Moved(usize),
    /// Advanced off the last lesson; the course is complete.
    Completed,
}

//
// ─── SEQUENCER ─────────────────────────────────────────────────────────────────
//

/// Tracks the current lesson and the furthest point reached by `advance`.
///
/// Jumping moves only the pointer; the frontier, the basis for the
/// percentage, moves exclusively through `advance`, so revisiting an old
/// lesson never grants or revokes completion credit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSequencer {
    current: usize,
    frontier: usize,
    completed: bool,
    // Which lesson indices carry a quiz, captured from the course layout so
    // the gate lives here rather than in every caller.
    gated: Vec<bool>,
}

impl LessonSequencer {
    /// Creates a sequencer positioned at the first lesson of the course.
    #[must_use]
    pub fn for_course(course: &Course) -> Self {
        Self {
            current: 0,
            frontier: 0,
            completed: false,
            gated: course.lessons().iter().map(|l| l.has_quiz()).collect(),
        }
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Furthest index reached through `advance` calls.
    #[must_use]
    pub fn frontier(&self) -> usize {
        self.frontier
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.gated.len()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.gated.len()
    }

    /// True if the current lesson is gated by a quiz.
    #[must_use]
    pub fn current_is_gated(&self) -> bool {
        self.gated.get(self.current).copied().unwrap_or(false)
    }

    /// Moves the pointer to any lesson, e.g. to revisit completed material.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::OutOfRange` for an invalid index.
    pub fn jump_to(&mut self, index: usize) -> Result<(), SequencerError> {
        if index >= self.gated.len() {
            return Err(SequencerError::OutOfRange {
                index,
                total: self.gated.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Advances past the current lesson.
    ///
    /// A gated lesson requires a passing `QuizScore`; a quizless lesson
    /// ignores `quiz_outcome` entirely. Advancing from the last lesson
    /// signals completion instead of moving past the end.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::QuizNotPassed` when the gate is not
    /// satisfied, or `SequencerError::CourseCompleted` after completion.
    pub fn advance(
        &mut self,
        quiz_outcome: Option<&QuizScore>,
    ) -> Result<AdvanceOutcome, SequencerError> {
        if self.completed {
            return Err(SequencerError::CourseCompleted);
        }
        if self.current_is_gated() && !quiz_outcome.is_some_and(|score| score.passed) {
            return Err(SequencerError::QuizNotPassed);
        }

        if self.is_last() {
            self.completed = true;
            self.frontier = self.gated.len();
            return Ok(AdvanceOutcome::Completed);
        }

        self.current += 1;
        self.frontier = self.frontier.max(self.current);
        Ok(AdvanceOutcome::Moved(self.current))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
