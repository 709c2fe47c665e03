//! Derived views over a user's whole ledger.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users/{user}/recalc` | Rebuilds cached leave totals; returns subjects |
//! | `GET`  | `/users/{user}/summary` | [`Summary`] |
//! | `GET`  | `/users/{user}/export` | Subject ledger as a CSV attachment |

use axum::{
  extract::State,
  http::header,
  response::IntoResponse,
};
use leavebook_core::{
  export::{subjects_csv, subjects_file_name},
  store::LedgerStore,
  summary::{Summary, SubjectSummary},
};

use crate::{
  ApiState,
  error::ApiError,
  extract::{Json, Path},
};

/// `POST /users/{user}/recalc`
pub async fn recalc<S>(
  State(state): State<ApiState<S>>,
  Path(user): Path<String>,
) -> Result<Json<Vec<SubjectSummary>>, ApiError>
where
  S: LedgerStore,
{
  let user = state.user(&user)?;
  let subjects = state
    .store
    .recalc(user)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(subjects.iter().map(SubjectSummary::from).collect()))
}

/// `GET /users/{user}/summary`
pub async fn summary<S>(
  State(state): State<ApiState<S>>,
  Path(user): Path<String>,
) -> Result<Json<Summary>, ApiError>
where
  S: LedgerStore,
{
  let user = state.user(&user)?;
  let subjects = state
    .store
    .list_subjects(user.clone())
    .await
    .map_err(ApiError::from_store)?;
  let events = state
    .store
    .list_events(user.clone())
    .await
    .map_err(ApiError::from_store)?;

  tracing::debug!(%user, subjects = subjects.len(), events = events.len(), "summary built");
  Ok(Json(Summary::build(user, &subjects, events)))
}

/// `GET /users/{user}/export`
pub async fn export<S>(
  State(state): State<ApiState<S>>,
  Path(user): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
{
  let user = state.user(&user)?;
  let subjects = state
    .store
    .list_subjects(user.clone())
    .await
    .map_err(ApiError::from_store)?;
  let csv = subjects_csv(&subjects).await?;

  let disposition = format!(
    "attachment; filename=\"{}\"",
    subjects_file_name(user.as_str())
  );
  Ok((
    [
      (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
      (header::CONTENT_DISPOSITION, disposition),
    ],
    csv,
  ))
}
