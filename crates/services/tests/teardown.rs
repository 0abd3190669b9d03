use std::sync::Arc;
use std::time::Duration;

use academy_core::model::{
    CertificateNumber, Course, CourseId, Lesson, LessonId, ProgressRecord, UserId,
};
use async_trait::async_trait;
use backend::{ApiError, CertificateDetails, CertificateReceipt, CourseApi, InMemoryCourseApi};
use services::{PlayerLoopService, SessionIdentity};

/// Delegating backend that holds every save for a fixed latency, so tests
/// can observe what happens to in-flight persistence around teardown.
struct SlowSaveApi {
    inner: InMemoryCourseApi,
    latency: Duration,
}

#[async_trait]
impl CourseApi for SlowSaveApi {
    async fn fetch_course(
        &self,
        course_id: CourseId,
        user_id: Option<UserId>,
    ) -> Result<Course, ApiError> {
        self.inner.fetch_course(course_id, user_id).await
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), ApiError> {
        tokio::time::sleep(self.latency).await;
        self.inner.save_progress(record).await
    }

    async fn request_certificate(
        &self,
        course_id: CourseId,
        user_id: UserId,
    ) -> Result<CertificateReceipt, ApiError> {
        self.inner.request_certificate(course_id, user_id).await
    }

    async fn fetch_certificate(
        &self,
        number: &CertificateNumber,
    ) -> Result<CertificateDetails, ApiError> {
        self.inner.fetch_certificate(number).await
    }
}

fn build_course() -> Course {
    let lessons = vec![
        Lesson::new(LessonId::new(1), "One", "5 min", "", None).unwrap(),
        Lesson::new(LessonId::new(2), "Two", "5 min", "", None).unwrap(),
    ];
    Course::new(CourseId::new(7), "Short Course", lessons).unwrap()
}

#[tokio::test(start_paused = true)]
async fn slow_save_lands_if_the_session_stays_open() {
    let store = InMemoryCourseApi::new();
    store.insert_course(build_course()).unwrap();
    let api = Arc::new(SlowSaveApi {
        inner: store.clone(),
        latency: Duration::from_secs(5),
    });

    let mut loop_svc = PlayerLoopService::new(api, SessionIdentity::user(UserId::new(9)))
        .with_score_review_delay(Duration::ZERO);
    let mut session = loop_svc.start_session(CourseId::new(7)).await.unwrap();

    loop_svc.advance(&mut session).unwrap();
    assert_eq!(session.percent(), 50);
    assert_eq!(loop_svc.pending_saves(), 1);

    loop_svc.flush_saves().await;
    assert_eq!(
        store.saved_percent(CourseId::new(7), UserId::new(9)).unwrap(),
        Some(50)
    );
}

#[tokio::test(start_paused = true)]
async fn teardown_abandons_in_flight_saves() {
    let store = InMemoryCourseApi::new();
    store.insert_course(build_course()).unwrap();
    let api = Arc::new(SlowSaveApi {
        inner: store.clone(),
        latency: Duration::from_secs(5),
    });

    let mut loop_svc = PlayerLoopService::new(api, SessionIdentity::user(UserId::new(9)))
        .with_score_review_delay(Duration::ZERO);
    let mut session = loop_svc.start_session(CourseId::new(7)).await.unwrap();

    loop_svc.advance(&mut session).unwrap();
    assert_eq!(loop_svc.pending_saves(), 1);

    // Navigating away: the pending save is aborted, never applied late.
    loop_svc.close_session();
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(
        store.saved_percent(CourseId::new(7), UserId::new(9)).unwrap(),
        None
    );
}
