//! Handlers for `/users/{user}/events` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users/{user}/events` | Insertion order |
//! | `POST`   | `/users/{user}/events` | Body: [`CreateBody`]; returns 201 + stored event |
//! | `GET`    | `/users/{user}/events/{id}` | 404 if not found |
//! | `PUT`    | `/users/{user}/events/{id}` | Body: [`UpdateBody`]; hours and note only |
//! | `DELETE` | `/users/{user}/events/{id}` | |

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use leavebook_core::{
  Error as CoreError,
  event::{AttendanceEvent, EventEdit, NewEvent},
  store::LedgerStore,
  subject::{CourseType, SubjectKey},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  ApiState,
  error::ApiError,
  extract::{Json, Path},
  input::{NumberInput, parse_date},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /users/{user}/events`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Path(user): Path<String>,
) -> Result<Json<Vec<AttendanceEvent>>, ApiError>
where
  S: LedgerStore,
{
  let user = state.user(&user)?;
  let events = state
    .store
    .list_events(user)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(events))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /users/{user}/events`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  /// Subject name.
  pub subject:     String,
  pub course_type: String,
  /// Leave hours.
  #[serde(default)]
  pub hours:       NumberInput,
  #[serde(default)]
  pub note:        String,
  /// `YYYY-MM-DD`; blank or absent means today.
  pub date:        Option<String>,
}

/// `POST /users/{user}/events`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Path(user): Path<String>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
{
  let user = state.user(&user)?;
  let key = SubjectKey::new(body.subject, CourseType::parse(&body.course_type)?);

  let mut input = NewEvent::new(key, body.hours.resolve("hours")?)?.with_note(body.note);
  if let Some(date) = parse_date(body.date.as_deref())? {
    input = input.on(date);
  }

  let event = state
    .store
    .add_event(user, input)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(event)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /users/{user}/events/{id}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path((user, id)): Path<(String, Uuid)>,
) -> Result<Json<AttendanceEvent>, ApiError>
where
  S: LedgerStore,
{
  let user = state.user(&user)?;
  let event = state
    .store
    .get_event(user, id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or(CoreError::EventNotFound(id))?;
  Ok(Json(event))
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  #[serde(default)]
  pub hours: NumberInput,
  #[serde(default)]
  pub note:  String,
}

/// `PUT /users/{user}/events/{id}`: body: `{"hours":2,"note":"..."}`
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path((user, id)): Path<(String, Uuid)>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<AttendanceEvent>, ApiError>
where
  S: LedgerStore,
{
  let user = state.user(&user)?;
  let edit = EventEdit::new(body.hours.resolve("hours")?, body.note)?;

  let event = state
    .store
    .edit_event(user, id, edit)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(event))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /users/{user}/events/{id}`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path((user, id)): Path<(String, Uuid)>,
) -> Result<StatusCode, ApiError>
where
  S: LedgerStore,
{
  let user = state.user(&user)?;
  state
    .store
    .delete_event(user, id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
