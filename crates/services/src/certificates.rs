//! Certificate eligibility gate and issuance requests.

use std::sync::Arc;

use backend::{ApiError, CertificateReceipt, CourseApi};

use crate::error::CertificateError;
use crate::identity::SessionIdentity;
use crate::player::PlayerSession;

/// Client-side certificate gate over the backend's authoritative check.
///
/// `can_request` is advisory only: it drives the locked/unlocked state of
/// the UI affordance. The backend re-checks completion on every request and
/// its verdict wins over the client's optimistic state.
#[derive(Clone)]
pub struct CertificateService {
    api: Arc<dyn CourseApi>,
    identity: SessionIdentity,
}

impl CertificateService {
    #[must_use]
    pub fn new(api: Arc<dyn CourseApi>, identity: SessionIdentity) -> Self {
        Self { api, identity }
    }

    /// Whether the request affordance should be enabled for this session.
    ///
    /// False for any course not (yet) completed; the UI shows the locked
    /// state with a progress tooltip instead of the action.
    #[must_use]
    pub fn can_request(&self, session: &PlayerSession) -> bool {
        session.completed()
    }

    /// Requests certificate issuance for the session's course.
    ///
    /// Calling this while `can_request` is false is a caller error (the
    /// control must not be exposed) and yields `NotEligible` just as a
    /// server rejection would.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::NotAuthenticated` without a signed-in
    /// user, `NotEligible` when the server's completion check rejects the
    /// request, `MalformedResponse` for a success without a certificate
    /// number, or `Transport` for network and server failures. None of
    /// these is retried automatically.
    pub async fn request(
        &self,
        session: &PlayerSession,
    ) -> Result<CertificateReceipt, CertificateError> {
        let user_id = self
            .identity
            .user_id()
            .ok_or(CertificateError::NotAuthenticated)?;
        if !session.completed() {
            return Err(CertificateError::NotEligible);
        }

        self.api
            .request_certificate(session.course().id(), user_id)
            .await
            .map_err(|err| match err {
                ApiError::NotEligible => CertificateError::NotEligible,
                ApiError::MalformedResponse(_) => CertificateError::MalformedResponse,
                other => CertificateError::Transport(other),
            })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
