use crate::commands::CmdResult;
use crate::error::Result;
use crate::render::placeholders;
use crate::store::TemplateStore;

pub fn list<S: TemplateStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_templates(store.list()))
}

/// Raw text of a template plus the placeholders it uses.
pub fn show<S: TemplateStore>(store: &S, name: &str) -> Result<CmdResult> {
    let template = store.load(name)?;
    let names = placeholders(&template.text);
    Ok(CmdResult::default()
        .with_placeholders(names)
        .with_template(template))
}
