//! Handlers for `/users/{user}/subjects` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users/{user}/subjects` | Subjects with derived leave figures |
//! | `POST`   | `/users/{user}/subjects` | Body: [`CreateBody`]; 409 on duplicate |
//! | `DELETE` | `/users/{user}/subjects/{course_type}/{name}` | Also removes the subject's events |

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use leavebook_core::{
  store::LedgerStore,
  subject::{CourseType, NewSubject, SubjectKey},
  summary::SubjectSummary,
};
use serde::Deserialize;

use crate::{
  ApiState,
  error::ApiError,
  extract::{Json, Path},
  input::NumberInput,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /users/{user}/subjects`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Path(user): Path<String>,
) -> Result<Json<Vec<SubjectSummary>>, ApiError>
where
  S: LedgerStore,
{
  let user = state.user(&user)?;
  let subjects = state
    .store
    .list_subjects(user)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(subjects.iter().map(SubjectSummary::from).collect()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name:        String,
  #[serde(default)]
  pub credits:     NumberInput,
  /// `"lecture"` or `"lab"`.
  pub course_type: String,
}

/// `POST /users/{user}/subjects`: body: `{"name":"Math","credits":3,"course_type":"lab"}`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Path(user): Path<String>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
{
  let user = state.user(&user)?;
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("subject name is required".to_owned()));
  }
  let input = NewSubject::new(
    body.name,
    body.credits.resolve("credits")?,
    CourseType::parse(&body.course_type)?,
  )?;

  let subject = state
    .store
    .add_subject(user, input)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(SubjectSummary::from(&subject))))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /users/{user}/subjects/{course_type}/{name}`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path((user, course_type, name)): Path<(String, String, String)>,
) -> Result<StatusCode, ApiError>
where
  S: LedgerStore,
{
  let user = state.user(&user)?;
  let key = SubjectKey::new(name, CourseType::parse(&course_type)?);

  state
    .store
    .delete_subject(user, key)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
