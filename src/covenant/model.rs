use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Fields that must be non-empty before anything is exported.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "party1",
    "party2",
    "start_date",
    "end_date",
    "governing_law",
];

/// The closed set of agreement templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    #[default]
    Service,
    Partnership,
    #[serde(rename = "NDA")]
    Nda,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [TemplateId::Service, TemplateId::Partnership, TemplateId::Nda];

    pub fn name(&self) -> &'static str {
        match self {
            TemplateId::Service => "Service",
            TemplateId::Partnership => "Partnership",
            TemplateId::Nda => "NDA",
        }
    }

    /// File holding this template inside the templates directory.
    pub fn filename(&self) -> &'static str {
        match self {
            TemplateId::Service => "service.txt",
            TemplateId::Partnership => "partnership.txt",
            TemplateId::Nda => "nda.txt",
        }
    }

    /// Matches a display name, exactly first and then ignoring case.
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some(id) = Self::ALL.iter().find(|id| id.name() == name) {
            return Some(*id);
        }
        let id = Self::ALL
            .iter()
            .find(|id| id.name().eq_ignore_ascii_case(name))
            .copied();
        if let Some(id) = id {
            tracing::debug!(requested = name, resolved = id.name(), "matched template ignoring case");
        }
        id
    }

    /// Like [`TemplateId::lookup`], but unknown names resolve to the default template.
    pub fn resolve(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            let fallback = Self::default();
            tracing::warn!(
                requested = name,
                fallback = fallback.name(),
                "unknown template, using default"
            );
            fallback
        })
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub text: String,
}

impl Template {
    pub fn new(id: TemplateId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// Placeholder values for one render. Keys that are not present read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, String>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn is_filled(&self, key: &str) -> bool {
        !self.get(key).is_empty()
    }

    /// Names from `required` whose value is empty, in the order given.
    pub fn missing(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|key| !self.is_filled(key))
            .map(|key| key.to_string())
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Fields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

/// Typed agreement details as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgreementDetails {
    pub party1: String,
    pub party2: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub governing_law: String,
    pub scope: String,
    pub compensation: String,
    pub special_terms: String,
    /// Additional placeholder values. These are applied last and win over the typed fields.
    pub extra: BTreeMap<String, String>,
}

impl AgreementDetails {
    pub fn to_fields(&self, template: TemplateId, today: NaiveDate) -> Fields {
        let iso = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();

        let mut fields = Fields::new()
            .with("party1", self.party1.trim())
            .with("party2", self.party2.trim())
            .with("start_date", iso(self.start_date))
            .with("end_date", iso(self.end_date))
            .with("governing_law", self.governing_law.trim())
            .with("scope", self.scope.as_str())
            .with("compensation", self.compensation.as_str())
            .with("special_terms", self.special_terms.as_str())
            .with("today", iso(Some(today)))
            .with("agreement_type", template.name());

        for (key, value) in &self.extra {
            fields.insert(key.as_str(), value.as_str());
        }
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Docx,
    Pdf,
}

impl ExportFormat {
    /// All formats, in export order.
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Txt, ExportFormat::Docx, ExportFormat::Pdf];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "TXT",
            ExportFormat::Docx => "DOCX",
            ExportFormat::Pdf => "PDF",
        }
    }

    /// Deduplicates and puts `formats` into export order.
    pub fn ordered(formats: &[ExportFormat]) -> Vec<ExportFormat> {
        Self::ALL
            .iter()
            .filter(|f| formats.contains(f))
            .copied()
            .collect()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .find(|f| f.extension().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown format: {} (expected txt, docx or pdf)", s))
    }
}

/// One written output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub format: ExportFormat,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub template: TemplateId,
    pub artifacts: Vec<Artifact>,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(template: TemplateId, artifacts: Vec<Artifact>) -> Self {
        Self {
            template,
            artifacts,
            created_at: Utc::now(),
        }
    }
}

/// Ordered log of generations, owned by the caller and passed in explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// The last `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact_and_case_insensitive() {
        assert_eq!(TemplateId::lookup("NDA"), Some(TemplateId::Nda));
        assert_eq!(TemplateId::lookup("partnership"), Some(TemplateId::Partnership));
        assert_eq!(TemplateId::lookup("lease"), None);
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_service() {
        assert_eq!(TemplateId::resolve("unknown-id"), TemplateId::Service);
        assert_eq!(TemplateId::resolve(""), TemplateId::Service);
    }

    #[test]
    fn test_fields_missing_keys_read_empty() {
        let fields = Fields::new().with("party1", "Acme");
        assert_eq!(fields.get("party1"), "Acme");
        assert_eq!(fields.get("party2"), "");
        assert!(!fields.is_filled("party2"));
    }

    #[test]
    fn test_missing_keeps_required_order() {
        let fields = Fields::new()
            .with("party1", "Acme")
            .with("party2", "")
            .with("start_date", "2024-01-01");
        assert_eq!(
            fields.missing(&REQUIRED_FIELDS),
            vec!["party2", "end_date", "governing_law"]
        );
    }

    #[test]
    fn test_details_to_fields() {
        let details = AgreementDetails {
            party1: " Acme Corp ".into(),
            party2: "Jane Smith".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: None,
            governing_law: "California".into(),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let fields = details.to_fields(TemplateId::Nda, today);

        assert_eq!(fields.get("party1"), "Acme Corp");
        assert_eq!(fields.get("start_date"), "2024-01-01");
        assert_eq!(fields.get("end_date"), "");
        assert_eq!(fields.get("today"), "2024-03-15");
        assert_eq!(fields.get("agreement_type"), "NDA");
        assert_eq!(fields.missing(&REQUIRED_FIELDS), vec!["end_date"]);
    }

    #[test]
    fn test_extra_fields_override_typed_ones() {
        let mut details = AgreementDetails::default();
        details.extra.insert("governing_law".into(), "India".into());
        details.extra.insert("notice_period".into(), "30 days".into());
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let fields = details.to_fields(TemplateId::Service, today);
        assert_eq!(fields.get("governing_law"), "India");
        assert_eq!(fields.get("notice_period"), "30 days");
    }

    #[test]
    fn test_export_format_parse_and_order() {
        assert_eq!("PDF".parse::<ExportFormat>(), Ok(ExportFormat::Pdf));
        assert!("odt".parse::<ExportFormat>().is_err());
        assert_eq!(
            ExportFormat::ordered(&[ExportFormat::Pdf, ExportFormat::Txt, ExportFormat::Pdf]),
            vec![ExportFormat::Txt, ExportFormat::Pdf]
        );
    }

    #[test]
    fn test_history_recent_is_newest_first() {
        let mut history = History::new();
        history.push(HistoryEntry::new(TemplateId::Service, vec![]));
        history.push(HistoryEntry::new(TemplateId::Partnership, vec![]));
        history.push(HistoryEntry::new(TemplateId::Nda, vec![]));

        let recent = history.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].template, TemplateId::Nda);
        assert_eq!(recent[1].template, TemplateId::Partnership);
    }

    #[test]
    fn test_template_id_serializes_display_name() {
        let json = serde_json::to_string(&TemplateId::Nda).unwrap();
        assert_eq!(json, "\"NDA\"");
    }
}
