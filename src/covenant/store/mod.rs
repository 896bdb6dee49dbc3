//! # Template Storage
//!
//! The [`TemplateStore`] trait resolves a template name to its raw text. Commands are
//! generic over it so they can be tested without touching the filesystem.
//!
//! ## Implementations
//!
//! - [`fs::FileTemplateStore`]: reads `{templates_dir}/{filename}`; a template file that
//!   does not exist is served from the copy built into the binary ([`builtin`]).
//! - [`memory::InMemoryTemplateStore`]: fixed texts for tests.
//!
//! ## Fallback Policy
//!
//! Names are resolved with [`TemplateId::resolve`]: an unknown name loads the default
//! (`Service`) template instead of failing.
//!
//! ## Layout
//!
//! ```text
//! templates/
//! ├── service.txt        # Service (default / fallback)
//! ├── partnership.txt    # Partnership
//! └── nda.txt            # NDA
//! ```
//!
//! Session history persistence lives in [`history`].

use crate::error::Result;
use crate::model::{Template, TemplateId};

pub mod builtin;
pub mod fs;
pub mod history;
pub mod memory;

pub trait TemplateStore {
    /// Raw text for a known template.
    fn load_id(&self, id: TemplateId) -> Result<Template>;

    /// Resolve `name` (falling back to the default template) and load it.
    fn load(&self, name: &str) -> Result<Template> {
        self.load_id(TemplateId::resolve(name))
    }

    /// Supported templates, in display order.
    fn list(&self) -> Vec<TemplateId> {
        TemplateId::ALL.to_vec()
    }
}
