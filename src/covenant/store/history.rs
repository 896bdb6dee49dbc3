//! JSON persistence for the session [`History`].

use crate::error::{CovenantError, Result};
use crate::model::History;
use std::fs;
use std::path::Path;

pub const HISTORY_FILENAME: &str = "history.json";
/// Entries kept on disk; older ones are dropped on save.
pub const MAX_STORED_ENTRIES: usize = 100;

/// Load history from `dir`, or an empty history if none was saved yet.
pub fn load<P: AsRef<Path>>(dir: P) -> Result<History> {
    let path = dir.as_ref().join(HISTORY_FILENAME);
    if !path.exists() {
        return Ok(History::new());
    }

    let content = fs::read_to_string(&path).map_err(CovenantError::Io)?;
    let history = serde_json::from_str(&content).map_err(CovenantError::Serialization)?;
    Ok(history)
}

/// Write the newest [`MAX_STORED_ENTRIES`] entries to `dir`.
pub fn save<P: AsRef<Path>>(history: &History, dir: P) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(CovenantError::Io)?;

    let entries = history.entries();
    let kept = &entries[entries.len().saturating_sub(MAX_STORED_ENTRIES)..];
    let content = serde_json::to_string_pretty(kept).map_err(CovenantError::Serialization)?;
    fs::write(dir.join(HISTORY_FILENAME), content).map_err(CovenantError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Artifact, ExportFormat, HistoryEntry, TemplateId};
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(load(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("data");

        let mut history = History::new();
        history.push(HistoryEntry::new(
            TemplateId::Nda,
            vec![Artifact {
                format: ExportFormat::Pdf,
                path: "output/nda_0123456789ab.pdf".into(),
            }],
        ));
        save(&history, &dir).unwrap();

        assert_eq!(load(&dir).unwrap(), history);
    }

    #[test]
    fn test_save_keeps_only_newest_entries() {
        let temp = TempDir::new().unwrap();
        let mut history = History::new();
        for _ in 0..MAX_STORED_ENTRIES + 5 {
            history.push(HistoryEntry::new(TemplateId::Service, vec![]));
        }
        history.push(HistoryEntry::new(TemplateId::Nda, vec![]));
        save(&history, temp.path()).unwrap();

        let loaded = load(temp.path()).unwrap();
        assert_eq!(loaded.len(), MAX_STORED_ENTRIES);
        assert_eq!(loaded.entries(), &history.entries()[6..]);
        assert_eq!(loaded.entries()[MAX_STORED_ENTRIES - 1].template, TemplateId::Nda);
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(HISTORY_FILENAME), "{not json").unwrap();
        assert!(matches!(
            load(temp.path()),
            Err(CovenantError::Serialization(_))
        ));
    }
}
