//! CSV export of a user's subject ledger.
//!
//! The layout matches the flat file the tracker has always offered for
//! download: `subject,credits,course_type,total_hours,leave_taken`.
//!
//! Numbers are written in their shortest form, so whole values carry no
//! fractional part: 3 credits export as `3`, not `3.0`.

use csv_async::AsyncWriter;

use crate::subject::Subject;

pub const SUBJECTS_HEADER: [&str; 5] =
  ["subject", "credits", "course_type", "total_hours", "leave_taken"];

/// Errors while rendering an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
  #[error("csv error: {0}")]
  Csv(#[from] csv_async::Error),

  #[error("failed to flush csv buffer")]
  Flush,
}

/// The download name for a user's subject export.
pub fn subjects_file_name(user: &str) -> String { format!("{user}_subjects.csv") }

/// Render `subjects` as CSV, header first, one row per subject.
pub async fn subjects_csv(subjects: &[Subject]) -> Result<String, ExportError> {
  let mut writer = AsyncWriter::from_writer(Vec::new());
  writer.write_record(SUBJECTS_HEADER).await?;

  for s in subjects {
    writer
      .write_record([
        s.key.name.clone(),
        s.credits.to_string(),
        s.key.course_type.to_string(),
        s.total_hours.to_string(),
        s.leave_taken.to_string(),
      ])
      .await?;
  }

  let bytes = writer.into_inner().await.map_err(|_| ExportError::Flush)?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}
