//! Handler for `GET /users`: the fixed roster.

use axum::{Json, extract::State};
use leavebook_core::{store::LedgerStore, user::UserId};

use crate::ApiState;

/// `GET /users`
pub async fn list<S>(State(state): State<ApiState<S>>) -> Json<Vec<UserId>>
where
  S: LedgerStore,
{
  Json(state.roster.users().to_vec())
}
