use super::ensure_parent;
use crate::error::{CovenantError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `text` verbatim as UTF-8.
pub fn export_text(text: &str, path: &Path) -> Result<PathBuf> {
    ensure_parent(path)?;
    fs::write(path, text).map_err(CovenantError::Io)?;
    Ok(path.to_path_buf())
}
