//! `leavebook`: command-line client for the Leavebook attendance ledger.
//!
//! # Usage
//!
//! ```
//! leavebook --user natasha add-subject Math --credits 3 --type lab
//! leavebook --user natasha log Math --type lab --hours 2 --note "dentist"
//! leavebook --user natasha summary
//! leavebook --config ~/.config/leavebook/config.toml export -o natasha.csv
//! ```

mod client;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use leavebook_core::subject::CourseType;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "leavebook", about = "Track attendance and leave against your subjects")]
struct Args {
  /// Path to a TOML config file (url, user).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the leavebook server (default: http://localhost:5000).
  #[arg(long, env = "LEAVEBOOK_URL")]
  url: Option<String>,

  /// Whose ledger to operate on.
  #[arg(short, long, env = "LEAVEBOOK_USER")]
  user: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List the users the server knows about.
  Users,
  /// List subjects with their leave budget.
  Subjects,
  /// Register a subject.
  AddSubject {
    name:        String,
    #[arg(long)]
    credits:     f64,
    #[arg(long = "type", value_parser = parse_course_type)]
    course_type: CourseType,
  },
  /// Delete a subject and every event recorded against it.
  DeleteSubject {
    name:        String,
    #[arg(long = "type", value_parser = parse_course_type)]
    course_type: CourseType,
  },
  /// List attendance events.
  Events,
  /// Record hours of leave against a subject.
  Log {
    subject:     String,
    #[arg(long = "type", value_parser = parse_course_type)]
    course_type: CourseType,
    #[arg(long)]
    hours:       f64,
    #[arg(long, default_value = "")]
    note:        String,
    /// YYYY-MM-DD; defaults to today.
    #[arg(long)]
    date:        Option<NaiveDate>,
  },
  /// Change the hours and note of an event.
  Edit {
    id:    Uuid,
    #[arg(long)]
    hours: f64,
    #[arg(long, default_value = "")]
    note:  String,
  },
  /// Delete one event.
  DeleteEvent { id: Uuid },
  /// Rebuild cached leave totals from the event list.
  Recalc,
  /// Show the full summary.
  Summary,
  /// Download the subject ledger as CSV.
  Export {
    /// Write to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
  },
}

fn parse_course_type(raw: &str) -> Result<CourseType, String> {
  CourseType::parse(raw).map_err(|e| e.to_string())
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:  String,
  #[serde(default)]
  user: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:5000".to_string()),
    user:     args
      .user
      .or_else(|| (!file_cfg.user.is_empty()).then(|| file_cfg.user.clone()))
      .unwrap_or_default(),
  };

  if api_config.user.is_empty() && !matches!(args.command, Command::Users) {
    anyhow::bail!("no user given; pass --user or set LEAVEBOOK_USER");
  }

  let client = ApiClient::new(api_config)?;
  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  tracing::debug!(?command, "dispatching");

  match command {
    Command::Users => {
      for user in client.users().await? {
        println!("{user}");
      }
    }
    Command::Subjects => print!("{}", render::subjects(&client.list_subjects().await?)),
    Command::AddSubject { name, credits, course_type } => {
      let s = client.add_subject(&name, credits, course_type).await?;
      println!("{} ({}) added: {} hours, {} hours of leave allowed.",
        s.name, s.course_type, s.total_hours, s.allowed_leave);
    }
    Command::DeleteSubject { name, course_type } => {
      client.delete_subject(&name, course_type).await?;
      println!("{name} ({course_type}) deleted.");
    }
    Command::Events => print!("{}", render::events(&client.list_events().await?)),
    Command::Log { subject, course_type, hours, note, date } => {
      let e = client.add_event(&subject, course_type, hours, &note, date).await?;
      println!("Attendance added: {} on {} ({}).", e.subject, e.date, e.event_id);
    }
    Command::Edit { id, hours, note } => {
      let e = client.edit_event(id, hours, &note).await?;
      println!("Attendance updated: {} now {} hours.", e.subject, e.hours);
    }
    Command::DeleteEvent { id } => {
      client.delete_event(id).await?;
      println!("Attendance deleted.");
    }
    Command::Recalc => print!("{}", render::subjects(&client.recalc().await?)),
    Command::Summary => print!("{}", render::summary(&client.summary().await?)),
    Command::Export { output } => {
      let csv = client.export().await?;
      match output {
        Some(path) => {
          std::fs::write(&path, csv)
            .with_context(|| format!("writing {}", path.display()))?;
          println!("Exported to {}.", path.display());
        }
        None => print!("{csv}"),
      }
    }
  }

  Ok(())
}
