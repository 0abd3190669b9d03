//! Contract for the course backend this subsystem collaborates with.

use async_trait::async_trait;
use thiserror::Error;

use academy_core::model::{CertificateNumber, Course, CourseId, ProgressRecord, UserId};

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    /// The server's own completion check rejected the request. The server
    /// is authoritative here; client-side optimism is not argued with.
    #[error("not eligible")]
    NotEligible,

    /// Success status but a required payload field was missing.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("backend request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Receipt for an issued certificate.
///
/// The certificate number is the only usable output; it addresses the
/// read-only certificate view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateReceipt {
    pub certificate_number: CertificateNumber,
}

/// Read-path shape of a certificate, addressed solely by its number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDetails {
    pub certificate_number: CertificateNumber,
    pub course_title: String,
    pub issued_to: String,
    /// Preformatted issue date label, carried verbatim for display.
    pub issued_on: String,
}

/// Backend contract for course content, progress persistence, and
/// certificate issuance.
#[async_trait]
pub trait CourseApi: Send + Sync {
    /// Fetch a course, with personalized `progress`/`completed` merged in
    /// when a user is supplied.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing, or transport errors.
    async fn fetch_course(
        &self,
        course_id: CourseId,
        user_id: Option<UserId>,
    ) -> Result<Course, ApiError>;

    /// Persist a progress record. Ack-only: duplicate calls are harmless,
    /// the server retains the maximum observed percent.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the record cannot be stored.
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), ApiError>;

    /// Request certificate issuance. The server re-checks completion and
    /// rejects regardless of what the client believes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotEligible` if the server's completion check
    /// fails, `ApiError::MalformedResponse` if a success response carries
    /// no certificate number, or transport errors.
    async fn request_certificate(
        &self,
        course_id: CourseId,
        user_id: UserId,
    ) -> Result<CertificateReceipt, ApiError>;

    /// Fetch the display shape of an issued certificate.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown number, or transport
    /// errors.
    async fn fetch_certificate(
        &self,
        number: &CertificateNumber,
    ) -> Result<CertificateDetails, ApiError>;
}
