use crate::config::CovenantConfig;
use crate::model::{Artifact, HistoryEntry, Template, TemplateId};
use crate::render::RenderedText;
use std::path::PathBuf;

pub mod config;
pub mod generate;
pub mod history;
pub mod init;
pub mod preview;
pub mod templates;

/// Where covenant keeps its files for one project.
#[derive(Debug, Clone)]
pub struct CovenantPaths {
    /// Project directory; relative config paths resolve against it.
    pub project: PathBuf,
    /// Per-project state directory (`.covenant/`), holds `config.json`.
    pub state: PathBuf,
    /// User data directory, holds `history.json`.
    pub data: PathBuf,
}

impl CovenantPaths {
    pub fn templates_dir(&self, config: &CovenantConfig) -> PathBuf {
        CovenantConfig::resolve(&self.project, &config.templates_dir)
    }

    pub fn output_dir(&self, config: &CovenantConfig) -> PathBuf {
        CovenantConfig::resolve(&self.project, &config.output_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub templates: Vec<TemplateId>,
    pub template: Option<Template>,
    pub placeholders: Vec<String>,
    pub rendered: Option<RenderedText>,
    pub artifacts: Vec<Artifact>,
    pub history: Vec<HistoryEntry>,
    pub paths: Vec<PathBuf>,
    pub config: Option<CovenantConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_templates(mut self, templates: Vec<TemplateId>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_placeholders(mut self, names: Vec<String>) -> Self {
        self.placeholders = names;
        self
    }

    pub fn with_rendered(mut self, rendered: RenderedText) -> Self {
        self.rendered = Some(rendered);
        self
    }

    pub fn with_artifacts(mut self, artifacts: Vec<Artifact>) -> Self {
        self.artifacts = artifacts;
        self
    }

    pub fn with_history(mut self, entries: Vec<HistoryEntry>) -> Self {
        self.history = entries;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: CovenantConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}
