//! Shared error types for the services crate.

use thiserror::Error;

use academy_core::evaluator::EvaluationError;
use academy_core::model::ProgressError;
use academy_core::sequencer::SequencerError;
use backend::ApiError;

/// Errors emitted by `PlayerSession` state transitions.
///
/// These are caller errors by contract: the UI disables the offending
/// affordance (submit before every question is answered, advance past a
/// failed quiz), so surfacing one means a control was exposed that should
/// not have been.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlayerSessionError {
    #[error("current lesson has no quiz")]
    NoQuiz,
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Sequencer(#[from] SequencerError),
}

/// Errors loading a course at session start.
///
/// Terminal for the view: a course that failed to fetch is never partially
/// rendered.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseLoadError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] PlayerSessionError),
}

/// Errors emitted by `CertificateService::request`.
///
/// Each variant carries a distinct user-facing message; none is retried
/// automatically; the user must re-trigger the action.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CertificateError {
    #[error("sign in to request a certificate")]
    NotAuthenticated,
    #[error("this course is not completed according to our records")]
    NotEligible,
    #[error("the certificate service returned an invalid response, please try again")]
    MalformedResponse,
    #[error("could not reach the certificate service")]
    Transport(#[source] ApiError),
}
