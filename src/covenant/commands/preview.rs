use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::AgreementDetails;
use crate::render::render;
use crate::store::TemplateStore;
use chrono::NaiveDate;

/// Renders without any gating; missing fields simply come out empty.
pub fn run<S: TemplateStore>(
    store: &S,
    name: &str,
    details: &AgreementDetails,
    today: NaiveDate,
) -> Result<CmdResult> {
    let template = store.load(name)?;
    let fields = details.to_fields(template.id, today);
    let rendered = render(&template, &fields);
    Ok(CmdResult::default()
        .with_rendered(rendered)
        .with_template(template))
}
