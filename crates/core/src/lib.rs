#![forbid(unsafe_code)]

pub mod error;
pub mod evaluator;
pub mod model;
pub mod sequencer;

pub use error::Error;
pub use evaluator::{evaluate, AnswerSheet, EvaluationError, QuizScore, PASS_MARK};
pub use sequencer::{AdvanceOutcome, LessonSequencer, SequencerError};
