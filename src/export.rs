//! CSV assembly for backend export payloads.
//!
//! The backend ships headers, rows and a filename; this module renders the
//! quoted CSV text and writes it to disk. Row fields are always quoted with
//! embedded quotes doubled; headers are backend-controlled identifiers and
//! written as-is.

use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::models::CsvExport;

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Renders an export payload as CSV text.
pub fn render_csv(export: &CsvExport) -> String {
    let mut lines = Vec::with_capacity(export.rows.len() + 1);
    lines.push(export.headers.join(","));
    for row in &export.rows {
        lines.push(
            row.iter()
                .map(|field| quote(field))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// Writes an export payload to `dir`, using the backend-provided filename.
/// Returns the path of the written file.
pub async fn write_csv(export: &CsvExport, dir: &Path) -> Result<PathBuf, AppError> {
    let path = dir.join(&export.filename);
    let content = render_csv(export);
    tokio::fs::write(&path, content)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to write {}: {}", path.display(), e)))?;
    tracing::info!("Wrote {} rows to {}", export.rows.len(), path.display());
    Ok(path)
}
