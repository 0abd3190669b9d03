#![forbid(unsafe_code)]

pub mod api;
pub mod http;
pub mod memory;

pub use api::{ApiError, CertificateDetails, CertificateReceipt, CourseApi};
pub use http::{BackendConfig, HttpCourseApi};
pub use memory::InMemoryCourseApi;
