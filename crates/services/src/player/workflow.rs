use std::sync::Arc;
use std::time::Duration;

use academy_core::evaluator::{AnswerSheet, QuizScore};
use academy_core::model::CourseId;
use backend::CourseApi;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::{CourseLoadError, PlayerSessionError};
use crate::identity::SessionIdentity;
use super::progress::PlayerProgress;
use super::service::PlayerSession;

/// How long a passing score stays on screen before the view advances.
pub const DEFAULT_SCORE_REVIEW_DELAY: Duration = Duration::from_secs(2);

/// Result of answering a quiz through the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizAttempt {
    pub score: QuizScore,
    /// Progress after the automatic advance; `None` on a fail.
    pub progress: Option<PlayerProgress>,
}

/// Orchestrates course sessions over the backend collaborator.
///
/// Progress updates are optimistic-first: local state changes immediately
/// and the persistence call is spawned without being awaited, in program
/// order. A failed save is logged and never rolled back: the learner's
/// forward progress is never visibly reverted. Outstanding saves are
/// tracked so teardown can abort them before their results could touch
/// stale state.
pub struct PlayerLoopService {
    api: Arc<dyn CourseApi>,
    identity: SessionIdentity,
    score_review_delay: Duration,
    saves: JoinSet<()>,
}

impl PlayerLoopService {
    #[must_use]
    pub fn new(api: Arc<dyn CourseApi>, identity: SessionIdentity) -> Self {
        Self {
            api,
            identity,
            score_review_delay: DEFAULT_SCORE_REVIEW_DELAY,
            saves: JoinSet::new(),
        }
    }

    /// Overrides the pause between a passing score and the advance.
    ///
    /// Zero is legal for non-visual contexts; scoring and advancing still
    /// happen in two observable steps.
    #[must_use]
    pub fn with_score_review_delay(mut self, delay: Duration) -> Self {
        self.score_review_delay = delay;
        self
    }

    #[must_use]
    pub fn identity(&self) -> SessionIdentity {
        self.identity
    }

    /// Opens a session for the given course, personalized when the
    /// identity carries a user.
    ///
    /// # Errors
    ///
    /// Returns `CourseLoadError` if the fetch fails; the failure is
    /// terminal for the view and no partial session is produced.
    pub async fn start_session(
        &self,
        course_id: CourseId,
    ) -> Result<PlayerSession, CourseLoadError> {
        let course = self
            .api
            .fetch_course(course_id, self.identity.user_id())
            .await?;
        Ok(PlayerSession::new(course)?)
    }

    /// Advances past the current lesson, applying the update locally and
    /// queueing persistence.
    ///
    /// The session reflects the new progress before the save is even
    /// issued; completion of the save is not awaited.
    ///
    /// # Errors
    ///
    /// Returns `PlayerSessionError` if the advance is not permitted. The
    /// persistence call itself cannot fail this method.
    pub fn advance(
        &mut self,
        session: &mut PlayerSession,
    ) -> Result<PlayerProgress, PlayerSessionError> {
        session.advance()?;
        self.queue_save(session);
        Ok(session.progress())
    }

    /// Scores the current lesson's quiz and, on a pass, advances after the
    /// score-review pause.
    ///
    /// On a fail the session is left untouched: the learner retakes from a
    /// cleared sheet and no progress is persisted.
    ///
    /// # Errors
    ///
    /// Returns `PlayerSessionError` for a lesson without a quiz or an
    /// incomplete sheet.
    pub async fn answer_quiz(
        &mut self,
        session: &mut PlayerSession,
        answers: &AnswerSheet,
    ) -> Result<QuizAttempt, PlayerSessionError> {
        let score = session.submit_quiz(answers)?;
        if !score.passed {
            return Ok(QuizAttempt {
                score,
                progress: None,
            });
        }

        // The score must be on screen before the view moves on.
        if !self.score_review_delay.is_zero() {
            tokio::time::sleep(self.score_review_delay).await;
        }

        let progress = self.advance(session)?;
        Ok(QuizAttempt {
            score,
            progress: Some(progress),
        })
    }

    /// Number of persistence calls still in flight.
    #[must_use]
    pub fn pending_saves(&self) -> usize {
        self.saves.len()
    }

    /// Waits for every queued save to settle.
    ///
    /// Not part of the player's interaction path (the UI never blocks on
    /// persistence) but useful before a clean shutdown and in tests.
    pub async fn flush_saves(&mut self) {
        while self.saves.join_next().await.is_some() {}
    }

    /// Tears the session down, abandoning in-flight persistence so late
    /// results never land on stale state.
    pub fn close_session(&mut self) {
        self.saves.abort_all();
    }

    fn queue_save(&mut self, session: &PlayerSession) {
        let Some(user_id) = self.identity.user_id() else {
            debug!(course = %session.course().id(), "anonymous session, skipping progress save");
            return;
        };

        let record = session.progress_record(user_id);
        let api = Arc::clone(&self.api);
        self.saves.spawn(async move {
            if let Err(err) = api.save_progress(&record).await {
                // Deliberately swallowed: optimistic local state stands and
                // the backend catches up on a later save or session.
                warn!(
                    course = %record.course_id(),
                    user = %record.user_id(),
                    percent = record.percent(),
                    error = %err,
                    "failed to persist course progress"
                );
            }
        });
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
