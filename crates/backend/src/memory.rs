//! In-memory backend implementation for testing and prototyping.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use academy_core::model::{
    CertificateNumber, Course, CourseId, Lesson, ProgressRecord, UserId,
};

use crate::api::{ApiError, CertificateDetails, CertificateReceipt, CourseApi};

/// Server-held progress for one learner in one course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct StoredProgress {
    percent: u8,
    completed: bool,
}

/// `CourseApi` backed by process memory.
///
/// Reproduces the collaborator semantics the engine depends on: progress is
/// merged as a maximum (duplicate saves are harmless) and certificate
/// issuance re-checks completion server-side. Failure and denial injection
/// let tests exercise the transport and eligibility paths.
#[derive(Clone, Default)]
pub struct InMemoryCourseApi {
    courses: Arc<Mutex<HashMap<CourseId, Course>>>,
    progress: Arc<Mutex<HashMap<(CourseId, UserId), StoredProgress>>>,
    certificates: Arc<Mutex<HashMap<String, CertificateDetails>>>,
    issued: Arc<AtomicU64>,
    fail_saves: Arc<AtomicBool>,
    deny_certificates: Arc<AtomicBool>,
}

impl InMemoryCourseApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a course definition (without per-user progress).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the registry lock is poisoned.
    pub fn insert_course(&self, course: Course) -> Result<(), ApiError> {
        let mut guard = self
            .courses
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        guard.insert(course.id(), course);
        Ok(())
    }

    /// When set, every `save_progress` call fails with `Unavailable`.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// When set, certificate requests are rejected as `NotEligible`
    /// regardless of stored progress, simulating a server-side recheck
    /// that disagrees with the client.
    pub fn set_deny_certificates(&self, deny: bool) {
        self.deny_certificates.store(deny, Ordering::SeqCst);
    }

    /// Server-observed percent for a learner, if any was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store lock is poisoned.
    pub fn saved_percent(
        &self,
        course_id: CourseId,
        user_id: UserId,
    ) -> Result<Option<u8>, ApiError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        Ok(guard.get(&(course_id, user_id)).map(|p| p.percent))
    }

    /// Number of certificates issued so far.
    #[must_use]
    pub fn issued_count(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    fn stored_progress(
        &self,
        course_id: CourseId,
        user_id: UserId,
    ) -> Result<StoredProgress, ApiError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        Ok(guard.get(&(course_id, user_id)).copied().unwrap_or_default())
    }
}

#[async_trait]
impl CourseApi for InMemoryCourseApi {
    async fn fetch_course(
        &self,
        course_id: CourseId,
        user_id: Option<UserId>,
    ) -> Result<Course, ApiError> {
        let base = {
            let guard = self
                .courses
                .lock()
                .map_err(|e| ApiError::Unavailable(e.to_string()))?;
            guard.get(&course_id).cloned().ok_or(ApiError::NotFound)?
        };

        let Some(user_id) = user_id else {
            return Ok(base);
        };

        let stored = self.stored_progress(course_id, user_id)?;
        let lessons: Vec<Lesson> = base.lessons().to_vec();
        Course::from_persisted(
            base.id(),
            base.title(),
            lessons,
            stored.percent,
            stored.completed,
        )
        .map_err(|err| ApiError::Unavailable(err.to_string()))
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), ApiError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(ApiError::Unavailable("injected save failure".into()));
        }

        let mut guard = self
            .progress
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        let entry = guard
            .entry((record.course_id(), record.user_id()))
            .or_default();
        // Max-merge: duplicates and out-of-order arrivals are harmless.
        entry.percent = entry.percent.max(record.percent());
        entry.completed |= record.completed();
        Ok(())
    }

    async fn request_certificate(
        &self,
        course_id: CourseId,
        user_id: UserId,
    ) -> Result<CertificateReceipt, ApiError> {
        if self.deny_certificates.load(Ordering::SeqCst) {
            return Err(ApiError::NotEligible);
        }

        let course_title = {
            let guard = self
                .courses
                .lock()
                .map_err(|e| ApiError::Unavailable(e.to_string()))?;
            guard
                .get(&course_id)
                .map(|course| course.title().to_owned())
                .ok_or(ApiError::NotFound)?
        };

        // The authoritative completion check, independent of client state.
        if !self.stored_progress(course_id, user_id)?.completed {
            return Err(ApiError::NotEligible);
        }

        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let number = CertificateNumber::new(format!("CERT-{course_id}-{user_id}-{sequence}"));
        let details = CertificateDetails {
            certificate_number: number.clone(),
            course_title,
            issued_to: format!("Learner {user_id}"),
            issued_on: String::new(),
        };

        let mut guard = self
            .certificates
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        guard.insert(number.as_str().to_owned(), details);

        Ok(CertificateReceipt {
            certificate_number: number,
        })
    }

    async fn fetch_certificate(
        &self,
        number: &CertificateNumber,
    ) -> Result<CertificateDetails, ApiError> {
        let guard = self
            .certificates
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        guard.get(number.as_str()).cloned().ok_or(ApiError::NotFound)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::model::LessonId;

    fn build_course(id: u64) -> Course {
        let lessons = vec![
            Lesson::new(LessonId::new(1), "Intro", "5 min", "", None).unwrap(),
            Lesson::new(LessonId::new(2), "Wrap-up", "5 min", "", None).unwrap(),
        ];
        Course::new(CourseId::new(id), format!("Course {id}"), lessons).unwrap()
    }

    fn record(course: u64, user: u64, percent: u8, completed: bool) -> ProgressRecord {
        ProgressRecord::new(CourseId::new(course), UserId::new(user), percent, completed).unwrap()
    }

    #[tokio::test]
    async fn fetch_without_user_returns_fresh_course() {
        let api = InMemoryCourseApi::new();
        api.insert_course(build_course(1)).unwrap();

        let course = api.fetch_course(CourseId::new(1), None).await.unwrap();
        assert_eq!(course.progress(), 0);
        assert!(!course.completed());
    }

    #[tokio::test]
    async fn fetch_unknown_course_is_not_found() {
        let api = InMemoryCourseApi::new();
        let err = api.fetch_course(CourseId::new(9), None).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn personalized_fetch_merges_saved_progress() {
        let api = InMemoryCourseApi::new();
        api.insert_course(build_course(1)).unwrap();
        api.save_progress(&record(1, 9, 50, false)).await.unwrap();

        let course = api
            .fetch_course(CourseId::new(1), Some(UserId::new(9)))
            .await
            .unwrap();
        assert_eq!(course.progress(), 50);

        // A different user sees no progress.
        let other = api
            .fetch_course(CourseId::new(1), Some(UserId::new(2)))
            .await
            .unwrap();
        assert_eq!(other.progress(), 0);
    }

    #[tokio::test]
    async fn save_progress_retains_maximum() {
        let api = InMemoryCourseApi::new();
        api.save_progress(&record(1, 9, 67, false)).await.unwrap();
        api.save_progress(&record(1, 9, 33, false)).await.unwrap();
        api.save_progress(&record(1, 9, 67, false)).await.unwrap();

        assert_eq!(
            api.saved_percent(CourseId::new(1), UserId::new(9)).unwrap(),
            Some(67)
        );
    }

    #[tokio::test]
    async fn certificate_requires_server_side_completion() {
        let api = InMemoryCourseApi::new();
        api.insert_course(build_course(1)).unwrap();
        api.save_progress(&record(1, 9, 67, false)).await.unwrap();

        let err = api
            .request_certificate(CourseId::new(1), UserId::new(9))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotEligible));
        assert_eq!(api.issued_count(), 0);

        api.save_progress(&record(1, 9, 100, true)).await.unwrap();
        let receipt = api
            .request_certificate(CourseId::new(1), UserId::new(9))
            .await
            .unwrap();
        assert_eq!(api.issued_count(), 1);

        let details = api
            .fetch_certificate(&receipt.certificate_number)
            .await
            .unwrap();
        assert_eq!(details.course_title, "Course 1");
    }

    #[tokio::test]
    async fn injected_failures_surface() {
        let api = InMemoryCourseApi::new();
        api.insert_course(build_course(1)).unwrap();
        api.save_progress(&record(1, 9, 100, true)).await.unwrap();

        api.set_fail_saves(true);
        let err = api.save_progress(&record(1, 9, 100, true)).await.unwrap_err();
        assert!(matches!(err, ApiError::Unavailable(_)));

        api.set_deny_certificates(true);
        let err = api
            .request_certificate(CourseId::new(1), UserId::new(9))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotEligible));
    }
}
