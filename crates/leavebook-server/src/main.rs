//! leavebook-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `LEAVEBOOK_*` environment variables, opens the SQLite ledger, and serves
//! the JSON API over HTTP.
//!
//! ```
//! cargo run -p leavebook-server -- --config ~/.config/leavebook/config.toml
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use leavebook_server::{expand_tilde, load_config};
use leavebook_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Leavebook attendance ledger server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = load_config(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let roster = server_cfg.roster();
  anyhow::ensure!(!roster.users().is_empty(), "no users configured");

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  tracing::info!(
    users = ?roster.users(),
    store = %store_path.display(),
    "ledger ready"
  );

  let app = leavebook_server::router(Arc::new(store), Arc::new(roster));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
