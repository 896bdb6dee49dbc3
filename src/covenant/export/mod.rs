//! # Multi-Format Exporter
//!
//! Writes rendered text to disk as plain text, DOCX, or PDF. Every function:
//!
//! - creates the parent directory of `path` when it is missing,
//! - overwrites an existing file at `path`,
//! - returns the path it wrote.
//!
//! All formats take the same already-rendered text; nothing is substituted here.
//! A failed write may leave a truncated file behind.

use crate::error::{CovenantError, Result};
use crate::model::ExportFormat;
use std::fs;
use std::path::{Path, PathBuf};

pub mod docx;
pub mod pdf;
pub mod text;

pub use docx::export_document;
pub use pdf::export_pdf;
pub use text::export_text;

/// Write `text` at `path` in the given format.
pub fn export(format: ExportFormat, text: &str, path: &Path) -> Result<PathBuf> {
    let written = match format {
        ExportFormat::Txt => export_text(text, path)?,
        ExportFormat::Docx => export_document(text, path)?,
        ExportFormat::Pdf => export_pdf(text, path)?,
    };
    tracing::info!(format = format.label(), path = %written.display(), "exported");
    Ok(written)
}

/// Paragraph units for the document formats: one per `\n`-separated piece, so a
/// trailing terminator yields a final empty paragraph.
pub(crate) fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(CovenantError::Io)?;
        }
    }
    Ok(())
}
