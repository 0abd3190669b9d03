use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CourseId, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("percent must be 0..=100, got {got}")]
    InvalidPercent { got: u8 },

    #[error("a completed record must be at 100 percent, got {got}")]
    IncompleteAtFullMark { got: u8 },
}

//
// ─── PERCENT ARITHMETIC ────────────────────────────────────────────────────────
//

/// Percentage for a completion frontier of `frontier` lessons out of `total`.
///
/// Rounds half away from zero, matching `round(100 * frontier / total)`.
/// A zero `total` yields 0 rather than dividing.
#[must_use]
pub fn percent_at(frontier: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = (100.0 * frontier as f64) / total as f64;
    // frontier never exceeds total, but cap anyway so the u8 cast is sound.
    ratio.round().min(100.0) as u8
}

//
// ─── PROGRESS STATE ────────────────────────────────────────────────────────────
//

/// Session-local high-water mark for progress.
///
/// The displayed percent is the maximum of everything ever observed, so a
/// recompute from an earlier frontier can never move it backward. This is a
/// pure value: `absorb` returns a new state and never touches I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressState {
    percent: u8,
    completed: bool,
}

impl ProgressState {
    /// Starts from a previously persisted percent/completion pair.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if `percent` exceeds 100 or `completed` is
    /// set below 100 percent.
    pub fn from_persisted(percent: u8, completed: bool) -> Result<Self, ProgressError> {
        if percent > 100 {
            return Err(ProgressError::InvalidPercent { got: percent });
        }
        if completed && percent != 100 {
            return Err(ProgressError::IncompleteAtFullMark { got: percent });
        }
        Ok(Self { percent, completed })
    }

    /// Folds a freshly computed observation into the high-water mark.
    ///
    /// Percent only ever rises, completion only ever latches on, and
    /// completion forces the percent to 100.
    #[must_use]
    pub fn absorb(self, percent: u8, completed: bool) -> Self {
        let completed = self.completed || completed;
        let floor = if completed { 100 } else { 0 };
        Self {
            percent: self.percent.max(percent.min(100)).max(floor),
            completed,
        }
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }
}

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// The unit exchanged with the backend: one learner's progress in one course.
///
/// Replaced wholesale on every transition; never mutated in place. The
/// converse of the completion invariant need not hold: percent may sit at
/// 100 before completion is durably confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    course_id: CourseId,
    user_id: UserId,
    percent: u8,
    completed: bool,
}

impl ProgressRecord {
    /// Builds the record persisted for a session's current high-water state.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if `percent` exceeds 100 or `completed` is
    /// set below 100 percent.
    pub fn new(
        course_id: CourseId,
        user_id: UserId,
        percent: u8,
        completed: bool,
    ) -> Result<Self, ProgressError> {
        if percent > 100 {
            return Err(ProgressError::InvalidPercent { got: percent });
        }
        if completed && percent != 100 {
            return Err(ProgressError::IncompleteAtFullMark { got: percent });
        }
        Ok(Self {
            course_id,
            user_id,
            percent,
            completed,
        })
    }

    /// Snapshot of a session state for the given learner.
    #[must_use]
    pub fn from_state(course_id: CourseId, user_id: UserId, state: ProgressState) -> Self {
        // State upholds the invariant by construction.
        Self {
            course_id,
            user_id,
            percent: state.percent(),
            completed: state.completed(),
        }
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
