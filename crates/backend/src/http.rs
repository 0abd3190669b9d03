//! HTTP adapter for the course backend.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use academy_core::model::{
    CertificateNumber, Course, CourseId, Lesson, LessonId, ProgressRecord, Question, Quiz, UserId,
};

use crate::api::{ApiError, CertificateDetails, CertificateReceipt, CourseApi};

/// Explicit configuration for the HTTP adapter.
///
/// Passed in at construction; nothing is read from ambient storage.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub base_url: String,
}

impl BackendConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// `CourseApi` adapter speaking the backend's JSON wire format.
#[derive(Clone)]
pub struct HttpCourseApi {
    client: Client,
    config: BackendConfig,
}

impl HttpCourseApi {
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CourseApi for HttpCourseApi {
    async fn fetch_course(
        &self,
        course_id: CourseId,
        user_id: Option<UserId>,
    ) -> Result<Course, ApiError> {
        let url = self.config.endpoint(&format!("courses/{course_id}"));
        let mut request = self.client.get(url);
        if let Some(user_id) = user_id {
            request = request.query(&[("userId", user_id.value())]);
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status if !status.is_success() => Err(ApiError::HttpStatus(status)),
            _ => response.json::<CourseDetailsDto>().await?.into_course(),
        }
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), ApiError> {
        let url = self
            .config
            .endpoint(&format!("courses/{}/progress", record.course_id()));
        let response = self
            .client
            .post(url)
            .json(&ProgressDto::from_record(record))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }
        Ok(())
    }

    async fn request_certificate(
        &self,
        course_id: CourseId,
        user_id: UserId,
    ) -> Result<CertificateReceipt, ApiError> {
        let url = self
            .config
            .endpoint(&format!("courses/{course_id}/certificate"));
        let response = self
            .client
            .post(url)
            .json(&CertificateRequestDto {
                user_id: user_id.value(),
            })
            .send()
            .await?;

        match response.status() {
            StatusCode::FORBIDDEN => Err(ApiError::NotEligible),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status if !status.is_success() => Err(ApiError::HttpStatus(status)),
            _ => response.json::<CertificateIssuedDto>().await?.into_receipt(),
        }
    }

    async fn fetch_certificate(
        &self,
        number: &CertificateNumber,
    ) -> Result<CertificateDetails, ApiError> {
        let url = self
            .config
            .endpoint(&format!("certificates/{}", number.as_str()));
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status if !status.is_success() => Err(ApiError::HttpStatus(status)),
            _ => Ok(response.json::<CertificateDetailsDto>().await?.into_details()),
        }
    }
}

//
// ─── WIRE SHAPES ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseDetailsDto {
    id: u64,
    title: String,
    lessons: Vec<LessonDto>,
    progress: Option<u8>,
    completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LessonDto {
    id: u64,
    title: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    content: String,
    quiz: Option<QuizDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizDto {
    questions: Vec<QuestionDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionDto {
    question: String,
    options: Vec<String>,
    correct_answer: usize,
}

impl CourseDetailsDto {
    /// Convert the wire shape into a domain `Course`.
    ///
    /// Personalized fields are normalized at this boundary (percent capped
    /// at 100, completion forces 100) before the strict domain constructor
    /// runs; anything still invalid is a malformed response.
    fn into_course(self) -> Result<Course, ApiError> {
        let mut lessons = Vec::with_capacity(self.lessons.len());
        for lesson in self.lessons {
            lessons.push(lesson.into_lesson()?);
        }

        let completed = self.completed.unwrap_or(false);
        let percent = if completed {
            100
        } else {
            self.progress.unwrap_or(0).min(100)
        };

        Course::from_persisted(CourseId::new(self.id), self.title, lessons, percent, completed)
            .map_err(|err| ApiError::MalformedResponse(err.to_string()))
    }
}

impl LessonDto {
    fn into_lesson(self) -> Result<Lesson, ApiError> {
        let quiz = match self.quiz {
            Some(quiz) => Some(quiz.into_quiz()?),
            None => None,
        };
        Lesson::new(LessonId::new(self.id), self.title, self.duration, self.content, quiz)
            .map_err(|err| ApiError::MalformedResponse(err.to_string()))
    }
}

impl QuizDto {
    fn into_quiz(self) -> Result<Quiz, ApiError> {
        let mut questions = Vec::with_capacity(self.questions.len());
        for question in self.questions {
            questions.push(
                Question::new(question.question, question.options, question.correct_answer)
                    .map_err(|err| ApiError::MalformedResponse(err.to_string()))?,
            );
        }
        Quiz::new(questions).map_err(|err| ApiError::MalformedResponse(err.to_string()))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressDto {
    course_id: u64,
    user_id: u64,
    percent: u8,
    completed: bool,
}

impl ProgressDto {
    fn from_record(record: &ProgressRecord) -> Self {
        Self {
            course_id: record.course_id().value(),
            user_id: record.user_id().value(),
            percent: record.percent(),
            completed: record.completed(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CertificateRequestDto {
    user_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CertificateIssuedDto {
    certificate_number: Option<String>,
}

impl CertificateIssuedDto {
    fn into_receipt(self) -> Result<CertificateReceipt, ApiError> {
        let number = self
            .certificate_number
            .filter(|number| !number.trim().is_empty())
            .ok_or_else(|| ApiError::MalformedResponse("missing certificateNumber".into()))?;
        Ok(CertificateReceipt {
            certificate_number: CertificateNumber::new(number),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CertificateDetailsDto {
    certificate_number: String,
    #[serde(default)]
    course_title: String,
    #[serde(default)]
    issued_to: String,
    #[serde(default)]
    issued_on: String,
}

impl CertificateDetailsDto {
    fn into_details(self) -> CertificateDetails {
        CertificateDetails {
            certificate_number: CertificateNumber::new(self.certificate_number),
            course_title: self.course_title,
            issued_to: self.issued_to,
            issued_on: self.issued_on,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
