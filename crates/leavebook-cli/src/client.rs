//! Async HTTP client wrapping the Leavebook JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use leavebook_core::{
  event::AttendanceEvent,
  subject::CourseType,
  summary::{Summary, SubjectSummary},
  user::UserId,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use uuid::Uuid;

/// Connection settings for the Leavebook API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub user:     String,
}

/// Async HTTP client for the Leavebook JSON REST API, bound to one user.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// Turn a non-success response into an error carrying the server's message.
async fn check(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let message = resp
    .json::<Value>()
    .await
    .ok()
    .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
    .unwrap_or_else(|| status.to_string());
  Err(anyhow!("{what} → {status}: {message}"))
}

async fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
  check(resp, what)
    .await?
    .json()
    .await
    .with_context(|| format!("deserialising response to {what}"))
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn user_url(&self, path: &str) -> String {
    self.url(&format!("/users/{}{}", self.config.user, path))
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  /// `GET /api/users`
  pub async fn users(&self) -> Result<Vec<UserId>> {
    let resp = self
      .client
      .get(self.url("/users"))
      .send()
      .await
      .context("GET /users failed")?;
    decode(resp, "GET /users").await
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  /// `GET /api/users/{user}/subjects`
  pub async fn list_subjects(&self) -> Result<Vec<SubjectSummary>> {
    let resp = self
      .client
      .get(self.user_url("/subjects"))
      .send()
      .await
      .context("GET /subjects failed")?;
    decode(resp, "GET /subjects").await
  }

  /// `POST /api/users/{user}/subjects`
  pub async fn add_subject(
    &self,
    name: &str,
    credits: f64,
    course_type: CourseType,
  ) -> Result<SubjectSummary> {
    let resp = self
      .client
      .post(self.user_url("/subjects"))
      .json(&json!({ "name": name, "credits": credits, "course_type": course_type }))
      .send()
      .await
      .context("POST /subjects failed")?;
    decode(resp, "POST /subjects").await
  }

  /// `DELETE /api/users/{user}/subjects/{course_type}/{name}`
  pub async fn delete_subject(&self, name: &str, course_type: CourseType) -> Result<()> {
    let mut url = reqwest::Url::parse(&self.user_url("/subjects"))
      .context("invalid base URL")?;
    url
      .path_segments_mut()
      .map_err(|_| anyhow!("base URL cannot carry a path"))?
      .push(&course_type.to_string())
      .push(name);

    let resp = self
      .client
      .delete(url)
      .send()
      .await
      .context("DELETE /subjects failed")?;
    check(resp, "DELETE /subjects").await?;
    Ok(())
  }

  // ── Events ────────────────────────────────────────────────────────────────

  /// `GET /api/users/{user}/events`
  pub async fn list_events(&self) -> Result<Vec<AttendanceEvent>> {
    let resp = self
      .client
      .get(self.user_url("/events"))
      .send()
      .await
      .context("GET /events failed")?;
    decode(resp, "GET /events").await
  }

  /// `POST /api/users/{user}/events`
  pub async fn add_event(
    &self,
    subject: &str,
    course_type: CourseType,
    hours: f64,
    note: &str,
    date: Option<NaiveDate>,
  ) -> Result<AttendanceEvent> {
    let resp = self
      .client
      .post(self.user_url("/events"))
      .json(&json!({
        "subject": subject,
        "course_type": course_type,
        "hours": hours,
        "note": note,
        "date": date.map(|d| d.to_string()),
      }))
      .send()
      .await
      .context("POST /events failed")?;
    decode(resp, "POST /events").await
  }

  /// `PUT /api/users/{user}/events/{id}`
  pub async fn edit_event(&self, id: Uuid, hours: f64, note: &str) -> Result<AttendanceEvent> {
    let resp = self
      .client
      .put(self.user_url(&format!("/events/{id}")))
      .json(&json!({ "hours": hours, "note": note }))
      .send()
      .await
      .context("PUT /events failed")?;
    decode(resp, "PUT /events").await
  }

  /// `DELETE /api/users/{user}/events/{id}`
  pub async fn delete_event(&self, id: Uuid) -> Result<()> {
    let resp = self
      .client
      .delete(self.user_url(&format!("/events/{id}")))
      .send()
      .await
      .context("DELETE /events failed")?;
    check(resp, "DELETE /events").await?;
    Ok(())
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  /// `POST /api/users/{user}/recalc`
  pub async fn recalc(&self) -> Result<Vec<SubjectSummary>> {
    let resp = self
      .client
      .post(self.user_url("/recalc"))
      .send()
      .await
      .context("POST /recalc failed")?;
    decode(resp, "POST /recalc").await
  }

  /// `GET /api/users/{user}/summary`
  pub async fn summary(&self) -> Result<Summary> {
    let resp = self
      .client
      .get(self.user_url("/summary"))
      .send()
      .await
      .context("GET /summary failed")?;
    decode(resp, "GET /summary").await
  }

  /// `GET /api/users/{user}/export`: the raw CSV text.
  pub async fn export(&self) -> Result<String> {
    let resp = self
      .client
      .get(self.user_url("/export"))
      .send()
      .await
      .context("GET /export failed")?;
    check(resp, "GET /export")
      .await?
      .text()
      .await
      .context("reading export body")
  }
}
