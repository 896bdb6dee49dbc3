use super::{builtin, TemplateStore};
use crate::error::{CovenantError, Result};
use crate::model::{Template, TemplateId};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory-backed template store.
pub struct FileTemplateStore {
    root: PathBuf,
}

impl FileTemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn template_path(&self, id: TemplateId) -> PathBuf {
        self.root.join(id.filename())
    }

    /// Writes the built-in texts into the templates directory, leaving existing files
    /// alone. Returns the paths that were created.
    pub fn materialize(&self) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.root).map_err(CovenantError::Io)?;

        let mut written = Vec::new();
        for id in TemplateId::ALL {
            let path = self.template_path(id);
            if path.exists() {
                continue;
            }
            fs::write(&path, builtin::text(id)).map_err(CovenantError::Io)?;
            written.push(path);
        }
        Ok(written)
    }
}

impl TemplateStore for FileTemplateStore {
    fn load_id(&self, id: TemplateId) -> Result<Template> {
        let path = self.template_path(id);
        match fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!(template = id.name(), path = %path.display(), "loaded template");
                Ok(Template::new(id, text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(template = id.name(), "template file not found, using built-in");
                Ok(Template::new(id, builtin::text(id)))
            }
            Err(e) => Err(CovenantError::Io(e)),
        }
    }
}
