use std::collections::HashMap;
use std::fmt;

use academy_core::evaluator::{self, AnswerSheet, QuizScore};
use academy_core::model::{percent_at, Course, Lesson, ProgressRecord, ProgressState, UserId};
use academy_core::sequencer::{AdvanceOutcome, LessonSequencer};

use crate::error::PlayerSessionError;
use super::progress::PlayerProgress;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory course-player session: one learner working through one course.
///
/// Holds the lesson sequencer, the per-lesson quiz outcomes, and the
/// high-water progress state. All updates are applied here optimistically;
/// persistence is layered on top by `PlayerLoopService` and never blocks or
/// reverts this state.
pub struct PlayerSession {
    course: Course,
    sequencer: LessonSequencer,
    progress: ProgressState,
    // Passing scores by lesson index; a pass is remembered for the session,
    // so revisiting a passed lesson does not force a retake.
    passed: HashMap<usize, QuizScore>,
}

impl PlayerSession {
    /// Opens a session over a fetched course, seeding the high-water mark
    /// from the personalized progress the backend returned.
    ///
    /// # Errors
    ///
    /// Returns `PlayerSessionError::Progress` if the course carries an
    /// invalid percent/completion pair.
    pub fn new(course: Course) -> Result<Self, PlayerSessionError> {
        let progress = ProgressState::from_persisted(course.progress(), course.completed())?;
        let sequencer = LessonSequencer::for_course(&course);
        Ok(Self {
            course,
            sequencer,
            progress,
            passed: HashMap::new(),
        })
    }

    #[must_use]
    pub fn course(&self) -> &Course {
        &self.course
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.sequencer.current()
    }

    /// The lesson the player is showing right now.
    #[must_use]
    pub fn current_lesson(&self) -> &Lesson {
        // The sequencer keeps its pointer in range for the session's lifetime.
        &self.course.lessons()[self.sequencer.current()]
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.progress.percent()
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.progress.completed()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> PlayerProgress {
        PlayerProgress {
            percent: self.progress.percent(),
            completed: self.progress.completed(),
            current_index: self.sequencer.current(),
            total_lessons: self.course.lesson_count(),
        }
    }

    /// Snapshot of the high-water state as the unit persisted for `user_id`.
    #[must_use]
    pub fn progress_record(&self, user_id: UserId) -> ProgressRecord {
        ProgressRecord::from_state(self.course.id(), user_id, self.progress)
    }

    /// True if the current lesson's quiz was already passed this session.
    #[must_use]
    pub fn current_quiz_passed(&self) -> bool {
        self.passed.contains_key(&self.sequencer.current())
    }

    /// Moves to any lesson by index, e.g. to revisit completed material.
    ///
    /// Jumping never grants completion credit; only `advance` moves the
    /// frontier the percentage is computed from.
    ///
    /// # Errors
    ///
    /// Returns `PlayerSessionError::Sequencer` for an out-of-range index.
    pub fn jump_to(&mut self, index: usize) -> Result<(), PlayerSessionError> {
        self.sequencer.jump_to(index)?;
        Ok(())
    }

    /// Scores a completed answer sheet against the current lesson's quiz.
    ///
    /// Pure with respect to position: the score is returned to the caller
    /// and must be observable before any advance happens. A pass is
    /// recorded so `advance` is unlocked; a fail records nothing and the
    /// caller starts the retake from a cleared sheet.
    ///
    /// # Errors
    ///
    /// Returns `PlayerSessionError::NoQuiz` if the current lesson has no
    /// quiz, or an evaluation error for an incomplete sheet.
    pub fn submit_quiz(&mut self, answers: &AnswerSheet) -> Result<QuizScore, PlayerSessionError> {
        let index = self.sequencer.current();
        let quiz = self
            .course
            .lessons()[index]
            .quiz()
            .ok_or(PlayerSessionError::NoQuiz)?;

        let score = evaluator::evaluate(quiz, answers)?;
        if score.passed {
            self.passed.insert(index, score);
        }
        Ok(score)
    }

    /// Advances past the current lesson and folds the new position into the
    /// high-water progress state.
    ///
    /// The update is applied locally before any persistence is attempted,
    /// and the percent can only rise: re-advancing from a revisited lesson
    /// reports an earlier frontier, which the reducer ignores.
    ///
    /// # Errors
    ///
    /// Returns `PlayerSessionError::Sequencer` if the current lesson's quiz
    /// has not been passed or the course is already completed.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, PlayerSessionError> {
        let score = self.passed.get(&self.sequencer.current()).copied();
        let outcome = self.sequencer.advance(score.as_ref())?;

        self.progress = match outcome {
            AdvanceOutcome::Moved(_) => self.progress.absorb(
                percent_at(self.sequencer.frontier(), self.course.lesson_count()),
                false,
            ),
            AdvanceOutcome::Completed => self.progress.absorb(100, true),
        };
        Ok(outcome)
    }
}

impl fmt::Debug for PlayerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerSession")
            .field("course_id", &self.course.id())
            .field("current", &self.sequencer.current())
            .field("frontier", &self.sequencer.frontier())
            .field("percent", &self.progress.percent())
            .field("completed", &self.progress.completed())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
