//! Render, gate on required fields, and export.
//!
//! Nothing is written unless every field in [`REQUIRED_FIELDS`] is filled. Each
//! requested format is exported independently: a failure in one is reported as an
//! error message and the remaining formats are still attempted. The generation is
//! recorded in the caller's [`History`] when at least one file was written.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CovenantError, Result};
use crate::export;
use crate::model::{
    AgreementDetails, Artifact, ExportFormat, History, HistoryEntry, TemplateId, REQUIRED_FIELDS,
};
use crate::render::render;
use crate::store::TemplateStore;
use chrono::NaiveDate;
use std::path::Path;
use uuid::Uuid;

const RUN_ID_LEN: usize = 12;

/// Short hex id that keeps one generation's files apart from every other's.
pub fn run_id() -> String {
    Uuid::new_v4().simple().to_string()[..RUN_ID_LEN].to_string()
}

/// `{template}_{id}`, with the template name lowercased.
pub fn base_name(template: TemplateId, run_id: &str) -> String {
    format!("{}_{}", template.name().to_lowercase(), run_id)
}

pub fn run<S: TemplateStore>(
    store: &S,
    name: &str,
    details: &AgreementDetails,
    formats: &[ExportFormat],
    output_dir: &Path,
    history: &mut History,
    today: NaiveDate,
) -> Result<CmdResult> {
    run_with_id(
        store,
        name,
        details,
        formats,
        output_dir,
        history,
        today,
        &run_id(),
    )
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn run_with_id<S: TemplateStore>(
    store: &S,
    name: &str,
    details: &AgreementDetails,
    formats: &[ExportFormat],
    output_dir: &Path,
    history: &mut History,
    today: NaiveDate,
    run_id: &str,
) -> Result<CmdResult> {
    let template = store.load(name)?;
    let fields = details.to_fields(template.id, today);

    let missing = fields.missing(&REQUIRED_FIELDS);
    if !missing.is_empty() {
        tracing::debug!(?missing, "required fields missing, nothing exported");
        return Err(CovenantError::MissingFields(missing));
    }

    let rendered = render(&template, &fields);
    let mut result = CmdResult::default();

    let formats = ExportFormat::ordered(formats);
    if formats.is_empty() {
        result.add_message(CmdMessage::warning("No export formats selected."));
        return Ok(result.with_rendered(rendered));
    }

    let base = base_name(template.id, run_id);
    let mut artifacts = Vec::with_capacity(formats.len());

    for format in formats {
        let path = output_dir.join(format!("{}.{}", base, format.extension()));
        match export::export(format, rendered.as_str(), &path) {
            Ok(path) => artifacts.push(Artifact { format, path }),
            Err(e) => {
                tracing::warn!(format = format.label(), error = %e, "export failed");
                result.add_message(CmdMessage::error(format!(
                    "{} export failed: {}",
                    format.label(),
                    e
                )));
            }
        }
    }

    if !artifacts.is_empty() {
        history.push(HistoryEntry::new(template.id, artifacts.clone()));
        result.add_message(CmdMessage::success(format!(
            "Generated {} agreement in {}",
            template.id,
            output_dir.display()
        )));
    }

    Ok(result.with_artifacts(artifacts).with_rendered(rendered))
}
