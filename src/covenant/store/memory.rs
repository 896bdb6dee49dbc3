use super::{builtin, TemplateStore};
use crate::error::Result;
use crate::model::{Template, TemplateId};
use std::collections::HashMap;

/// In-memory template store for tests.
/// Templates that were not set explicitly use the built-in text.
#[derive(Default)]
pub struct InMemoryTemplateStore {
    texts: HashMap<TemplateId, String>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, id: TemplateId, text: impl Into<String>) -> Self {
        self.texts.insert(id, text.into());
        self
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn load_id(&self, id: TemplateId) -> Result<Template> {
        let text = self
            .texts
            .get(&id)
            .cloned()
            .unwrap_or_else(|| builtin::text(id).to_string());
        Ok(Template::new(id, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_matches_default() {
        let store = InMemoryTemplateStore::new().with_template(TemplateId::Service, "svc");
        assert_eq!(store.load("unknown-id").unwrap().text, "svc");
        assert_eq!(
            store.load("unknown-id").unwrap(),
            store.load("Service").unwrap()
        );
    }

    #[test]
    fn test_list_is_display_order() {
        let store = InMemoryTemplateStore::new();
        assert_eq!(
            store.list(),
            vec![TemplateId::Service, TemplateId::Partnership, TemplateId::Nda]
        );
    }
}
