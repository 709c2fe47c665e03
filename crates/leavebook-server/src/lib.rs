//! HTTP server wiring for Leavebook: configuration and the top-level router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use leavebook_core::{
  store::LedgerStore,
  user::{DEFAULT_USERS, Roster},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `LEAVEBOOK_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// The fixed roster of users the ledger serves.
  pub users:      Vec<String>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_owned(),
      port:       5000,
      store_path: PathBuf::from("leavebook.db"),
      users:      DEFAULT_USERS.iter().map(|u| (*u).to_owned()).collect(),
    }
  }
}

impl ServerConfig {
  pub fn roster(&self) -> Roster { Roster::new(&self.users) }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Layer the optional TOML file at `path` under the environment.
///
/// `LEAVEBOOK_USERS` is read as a comma-separated list.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(
      config::Environment::with_prefix("LEAVEBOOK")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("users"),
    )
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the server's axum [`Router`]: the JSON API under `/api`, with
/// request tracing.
pub fn router<S>(store: Arc<S>, roster: Arc<Roster>) -> Router
where
  S: LedgerStore + 'static,
{
  Router::new()
    .nest("/api", leavebook_api::api_router(store, roster))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use std::io::Write as _;

  use leavebook_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  fn temp_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
  }

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = load_config(Path::new("/nonexistent/leavebook.toml")).unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.address(), "127.0.0.1:5000");
    assert_eq!(
      cfg.roster().users().iter().map(|u| u.as_str()).collect::<Vec<_>>(),
      ["keerthana", "natasha"]
    );
  }

  #[test]
  fn file_values_override_defaults() {
    let file = temp_config(
      "port = 8080\nstore_path = \"/tmp/ledger.db\"\nusers = [\"Ann\", \"bo\"]\n",
    );
    let cfg = load_config(file.path()).unwrap();

    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/ledger.db"));
    assert!(cfg.roster().resolve("ann").is_ok());
    assert!(cfg.roster().resolve("natasha").is_err());
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/ledger.db")),
      PathBuf::from(home).join("ledger.db")
    );
    assert_eq!(expand_tilde(Path::new("/abs/ledger.db")), PathBuf::from("/abs/ledger.db"));
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = router(Arc::new(store), Arc::new(Roster::default()));

    let resp = app
      .clone()
      .oneshot(Request::builder().uri("/api/users").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let users: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(users, serde_json::json!(["keerthana", "natasha"]));

    let resp = app
      .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
