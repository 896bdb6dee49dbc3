use crate::api::{CovenantApi, CovenantPaths};
use crate::config::CovenantConfig;
use crate::error::{CovenantError, Result};
use crate::model::History;
use crate::store::fs::FileTemplateStore;
use crate::store::history;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides the user data directory (where history is kept).
pub const DATA_DIR_ENV: &str = "COVENANT_DATA_DIR";
pub const STATE_DIR_NAME: &str = ".covenant";

pub struct CovenantContext {
    pub api: CovenantApi<FileTemplateStore>,
    pub history: History,
}

impl CovenantContext {
    /// Persist the session history back to the data directory.
    pub fn save_history(&self) -> Result<()> {
        history::save(&self.history, &self.api.paths().data)
    }
}

/// Resolve the data directory: `COVENANT_DATA_DIR`, then the platform data dir,
/// then the project state dir when no home directory can be determined.
pub fn data_dir(state_dir: &Path) -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    ProjectDirs::from("com", "covenant", "covenant")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| state_dir.to_path_buf())
}

/// History is secondary: an unreadable file is logged and replaced by an empty log.
/// A file that does not parse is moved aside so the next save does not lose it.
fn load_history(dir: &Path) -> History {
    match history::load(dir) {
        Ok(history) => history,
        Err(CovenantError::Serialization(e)) => {
            let path = dir.join(history::HISTORY_FILENAME);
            let aside = path.with_extension("json.bad");
            match std::fs::rename(&path, &aside) {
                Ok(()) => tracing::warn!(
                    error = %e,
                    moved_to = %aside.display(),
                    "history file is corrupt, starting a new one"
                ),
                Err(rename_err) => tracing::warn!(
                    error = %e,
                    rename_error = %rename_err,
                    "history file is corrupt, ignoring it"
                ),
            }
            History::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not read history, starting empty");
            History::new()
        }
    }
}

pub fn initialize(project_dir: &Path) -> Result<CovenantContext> {
    let state = project_dir.join(STATE_DIR_NAME);
    let paths = CovenantPaths {
        project: project_dir.to_path_buf(),
        data: data_dir(&state),
        state,
    };

    let config = CovenantConfig::load(&paths.state)?;
    let store = FileTemplateStore::new(paths.templates_dir(&config));
    let history = load_history(&paths.data);
    tracing::debug!(
        project = %paths.project.display(),
        data = %paths.data.display(),
        templates = %store.root().display(),
        entries = history.len(),
        "initialized context"
    );

    Ok(CovenantContext {
        api: CovenantApi::new(store, paths, config),
        history,
    })
}
