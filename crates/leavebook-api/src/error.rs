//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use leavebook_core::{DomainError, Error as CoreError, export::ExportError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("export error: {0}")]
  Export(#[from] ExportError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error: domain errors keep their meaning, everything
  /// else is an internal storage failure.
  pub fn from_store<E>(e: E) -> Self
  where
    E: DomainError + std::error::Error + Send + Sync + 'static,
  {
    if let Some(core) = e.domain() {
      return Self::from(core);
    }
    Self::Store(Box::new(e))
  }
}

impl From<&CoreError> for ApiError {
  fn from(e: &CoreError) -> Self {
    let message = e.to_string();
    match e {
      CoreError::DuplicateSubject(_) => Self::Conflict(message),
      CoreError::SubjectNotFound(_)
      | CoreError::EventNotFound(_)
      | CoreError::UnknownUser(_) => Self::NotFound(message),
      CoreError::UnknownCourseType(_) | CoreError::InvalidNumeric { .. } => {
        Self::BadRequest(message)
      }
    }
  }
}

impl From<CoreError> for ApiError {
  fn from(e: CoreError) -> Self { Self::from(&e) }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { Self::BadRequest(r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { Self::BadRequest(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Export(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    if status.is_server_error() {
      tracing::error!(%status, error = %message, "request failed");
    } else {
      tracing::warn!(%status, error = %message, "request rejected");
    }

    (status, Json(json!({ "error": message }))).into_response()
  }
}
