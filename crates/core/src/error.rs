use thiserror::Error;

use crate::evaluator::EvaluationError;
use crate::model::{CourseError, ProgressError, QuizError};
use crate::sequencer::SequencerError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Sequencer(#[from] SequencerError),
}
