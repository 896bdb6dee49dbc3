//! # API Facade
//!
//! Thin entry point over the command layer, shared by every client.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::*` function
//! - **Supplies context** the commands take as plain arguments: today's date,
//!   the configured output directory and default formats
//! - **Returns structured types** (`Result<CmdResult>`), never strings for display
//!
//! `CovenantApi<S: TemplateStore>` is generic over the template source:
//! `FileTemplateStore` in production, `InMemoryTemplateStore` in tests.
//!
//! The session [`History`] is not owned here. Callers pass their own log to
//! [`CovenantApi::generate`] and decide whether and where to persist it.

use crate::commands;
use crate::config::CovenantConfig;
use crate::error::Result;
use crate::model::{AgreementDetails, ExportFormat, History};
use crate::store::TemplateStore;
use chrono::{Local, NaiveDate};

pub struct CovenantApi<S: TemplateStore> {
    store: S,
    paths: commands::CovenantPaths,
    config: CovenantConfig,
}

impl<S: TemplateStore> CovenantApi<S> {
    pub fn new(store: S, paths: commands::CovenantPaths, config: CovenantConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn templates(&self) -> Result<commands::CmdResult> {
        commands::templates::list(&self.store)
    }

    pub fn show_template(&self, name: &str) -> Result<commands::CmdResult> {
        commands::templates::show(&self.store, name)
    }

    pub fn preview(&self, name: &str, details: &AgreementDetails) -> Result<commands::CmdResult> {
        commands::preview::run(&self.store, name, details, today())
    }

    /// Exports `formats`, or the configured default formats when `formats` is empty.
    pub fn generate(
        &self,
        name: &str,
        details: &AgreementDetails,
        formats: &[ExportFormat],
        history: &mut History,
    ) -> Result<commands::CmdResult> {
        let formats = if formats.is_empty() {
            self.config.formats.as_slice()
        } else {
            formats
        };
        let output_dir = self.paths.output_dir(&self.config);
        commands::generate::run(
            &self.store,
            name,
            details,
            formats,
            &output_dir,
            history,
            today(),
        )
    }

    /// Recent history, limited to `limit` or the configured history limit.
    pub fn history(&self, history: &History, limit: Option<usize>) -> Result<commands::CmdResult> {
        commands::history::recent(history, limit.unwrap_or(self.config.history_limit))
    }

    pub fn clear_history(&self, history: &mut History) -> Result<commands::CmdResult> {
        commands::history::clear(history)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths)
    }

    pub fn paths(&self) -> &commands::CovenantPaths {
        &self.paths
    }

    pub fn settings(&self) -> &CovenantConfig {
        &self.config
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, CovenantPaths, MessageLevel};
