use crate::commands::{CmdMessage, CmdResult, CovenantPaths};
use crate::config::CovenantConfig;
use crate::error::{CovenantError, Result};
use crate::store::fs::FileTemplateStore;
use std::fs;

/// Creates `.covenant/` with a default config and copies the built-in templates into
/// the templates directory so they can be customized. Existing files are kept.
pub fn run(paths: &CovenantPaths) -> Result<CmdResult> {
    fs::create_dir_all(&paths.state).map_err(CovenantError::Io)?;

    let mut result = CmdResult::default();
    let config = if CovenantConfig::exists(&paths.state) {
        CovenantConfig::load(&paths.state)?
    } else {
        let config = CovenantConfig::default();
        config.save(&paths.state)?;
        config
    };

    let store = FileTemplateStore::new(paths.templates_dir(&config));
    let written = store.materialize()?;

    result.add_message(CmdMessage::success(format!(
        "Initialized covenant at {}",
        paths.state.display()
    )));
    if written.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Templates already present in {}",
            store.root().display()
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Wrote {} template(s) to {}",
            written.len(),
            store.root().display()
        )));
    }

    Ok(result.with_paths(written).with_config(config))
}
