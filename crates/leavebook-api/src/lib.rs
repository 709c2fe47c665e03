//! JSON REST API for Leavebook.
//!
//! Exposes an axum [`Router`] backed by any [`LedgerStore`]. Every route is
//! scoped to a user from the configured [`Roster`]; unknown users get 404.
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", leavebook_api::api_router(store.clone(), roster.clone()))
//! ```

pub mod error;
pub mod events;
pub mod extract;
pub mod input;
pub mod ledger;
pub mod subjects;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use leavebook_core::{
  store::LedgerStore,
  user::{Roster, UserId},
};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub roster: Arc<Roster>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), roster: Arc::clone(&self.roster) }
  }
}

impl<S> ApiState<S> {
  /// Resolve the `{user}` path segment against the roster.
  pub fn user(&self, raw: &str) -> Result<UserId, ApiError> {
    Ok(self.roster.resolve(raw)?)
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, roster: Arc<Roster>) -> Router<()>
where
  S: LedgerStore + 'static,
{
  Router::new()
    .route("/users", get(users::list::<S>))
    // Subjects
    .route(
      "/users/{user}/subjects",
      get(subjects::list::<S>).post(subjects::create::<S>),
    )
    .route(
      "/users/{user}/subjects/{course_type}/{name}",
      delete(subjects::delete_one::<S>),
    )
    // Events
    .route(
      "/users/{user}/events",
      get(events::list::<S>).post(events::create::<S>),
    )
    .route(
      "/users/{user}/events/{id}",
      get(events::get_one::<S>)
        .put(events::update::<S>)
        .delete(events::delete_one::<S>),
    )
    // Derived views
    .route("/users/{user}/recalc", post(ledger::recalc::<S>))
    .route("/users/{user}/summary", get(ledger::summary::<S>))
    .route("/users/{user}/export", get(ledger::export::<S>))
    .with_state(ApiState { store, roster })
}

// ─── Integration tests ────────────────────────────────────────────────────────
