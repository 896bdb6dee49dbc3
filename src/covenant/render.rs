//! # Safe Renderer
//!
//! Fills `{name}` placeholders from a [`Fields`] map and normalizes the result.
//!
//! Rendering is a total function: a placeholder with no value becomes the empty
//! string, values for names the template never mentions are ignored, and braces
//! that do not form a placeholder are copied through as they are. `{{` and `}}`
//! produce literal braces.
//!
//! Normalization then cleans up what empty optional fields leave behind:
//!
//! 1. every line is right-trimmed,
//! 2. runs of blank lines collapse into a single blank line,
//! 3. the document is trimmed and ends with exactly one `\n`.
//!
//! The resulting [`RenderedText`] is what both the preview and every export
//! format consume.

use crate::model::{Fields, Template};
use std::fmt;

/// Final, normalized document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedText(String);

impl RenderedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lines in document order, without terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RenderedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn render(template: &Template, fields: &Fields) -> RenderedText {
    render_str(&template.text, fields)
}

pub fn render_str(template: &str, fields: &Fields) -> RenderedText {
    let filled = substitute(template, fields);
    tracing::debug!(
        template_len = template.len(),
        filled_len = filled.len(),
        "rendered template"
    );
    RenderedText(normalize(&filled))
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns the placeholder name if `rest` starts with `name}`.
fn placeholder_at(rest: &str) -> Option<&str> {
    let end = rest.find(|c: char| !is_name_char(c))?;
    if end > 0 && rest[end..].starts_with('}') {
        Some(&rest[..end])
    } else {
        None
    }
}

fn substitute(template: &str, fields: &Fields) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
        } else if let Some(name) = tail.strip_prefix('{').and_then(placeholder_at) {
            out.push_str(fields.get(name));
            rest = &tail[name.len() + 2..];
        } else {
            out.push_str(&tail[..1]);
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

fn normalize(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut prev_blank = false;

    for line in text.lines() {
        let line = line.trim_end();
        let is_blank = line.is_empty();
        if is_blank && prev_blank {
            continue;
        }
        lines.push(line);
        prev_blank = is_blank;
    }

    let mut out = lines.join("\n").trim().to_string();
    out.push('\n');
    out
}

/// Distinct placeholder names in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        let tail = &rest[pos..];
        if tail.starts_with("{{") || tail.starts_with("}}") {
            rest = &tail[2..];
        } else if let Some(name) = tail.strip_prefix('{').and_then(placeholder_at) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
            rest = &tail[name.len() + 2..];
        } else {
            rest = &tail[1..];
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_scenario_missing_and_empty_values() {
        let template = "Hello {party1} and {party2}. Term: {start_date} to {end_date}.";
        let f = fields(&[
            ("party1", "Acme"),
            ("party2", ""),
            ("start_date", "2024-01-01"),
            ("end_date", "2024-12-31"),
        ]);
        assert_eq!(
            render_str(template, &f).as_str(),
            "Hello Acme and . Term: 2024-01-01 to 2024-12-31.\n"
        );
    }

    #[test]
    fn test_unknown_placeholders_become_empty() {
        let out = render_str("A{nope}B {also_missing}", &Fields::new());
        assert_eq!(out.as_str(), "AB\n");
    }

    #[test]
    fn test_extraneous_keys_are_ignored() {
        let f = fields(&[("party1", "Acme"), ("unused", "zzz")]);
        assert_eq!(render_str("By {party1}", &f).as_str(), "By Acme\n");
    }

    #[test]
    fn test_template_without_placeholders_is_unchanged() {
        let out = render_str("Plain agreement text.\nSecond line.\n", &Fields::new());
        assert_eq!(out.as_str(), "Plain agreement text.\nSecond line.\n");
    }

    #[test]
    fn test_three_blank_lines_collapse_to_one() {
        let out = render_str("First\n\n\n\nSecond", &Fields::new());
        assert_eq!(out.as_str(), "First\n\nSecond\n");
    }

    #[test]
    fn test_blank_lines_left_by_empty_fields_collapse() {
        let template = "Terms\n\n{special_terms}\n\n{scope}\n\nSigned";
        let out = render_str(template, &Fields::new());
        assert_eq!(out.as_str(), "Terms\n\nSigned\n");
    }

    #[test]
    fn test_whitespace_only_lines_count_as_blank() {
        let out = render_str("A  \n   \n\t\n \nB\t ", &Fields::new());
        assert_eq!(out.as_str(), "A\n\nB\n");
    }

    #[test]
    fn test_leading_and_trailing_blank_lines_removed() {
        let out = render_str("\n\n  \nBody\n\n\n", &Fields::new());
        assert_eq!(out.as_str(), "Body\n");
    }

    #[test]
    fn test_empty_template_renders_single_terminator() {
        assert_eq!(render_str("", &Fields::new()).as_str(), "\n");
        assert_eq!(render_str("{party1}", &Fields::new()).as_str(), "\n");
    }

    #[test]
    fn test_crlf_input_is_normalized() {
        let out = render_str("One\r\n\r\n\r\nTwo\r\n", &Fields::new());
        assert_eq!(out.as_str(), "One\n\nTwo\n");
    }

    #[test]
    fn test_stray_and_escaped_braces() {
        let f = fields(&[("x", "1")]);
        assert_eq!(render_str("{{x}} {x}", &f).as_str(), "{x} 1\n");
        assert_eq!(render_str("a { b } {x", &f).as_str(), "a { b } {x\n");
        assert_eq!(render_str("{not a name} }", &f).as_str(), "{not a name} }\n");
        assert_eq!(render_str("{}", &f).as_str(), "{}\n");
    }

    #[test]
    fn test_values_are_not_re_rendered() {
        let f = fields(&[("party1", "{party2}"), ("party2", "Beta")]);
        assert_eq!(render_str("{party1}", &f).as_str(), "{party2}\n");
    }

    #[test]
    fn test_multiline_values_are_normalized_too() {
        let f = fields(&[("scope", "Design  \n\n\n\nBuild")]);
        assert_eq!(render_str("Scope:\n{scope}", &f).as_str(), "Scope:\nDesign\n\nBuild\n");
    }

    #[test]
    fn test_render_is_deterministic() {
        let template = Template::new(
            crate::model::TemplateId::Service,
            "{party1}\n\n\n{party2}\n",
        );
        let f = fields(&[("party1", "A"), ("party2", "B")]);
        assert_eq!(render(&template, &f), render(&template, &f));
    }

    #[test]
    fn test_lines_iterates_in_order() {
        let out = render_str("a\n\n\nb\nc", &Fields::new());
        assert_eq!(out.lines().collect::<Vec<_>>(), vec!["a", "", "b", "c"]);
    }

    #[test]
    fn test_placeholders_first_appearance_order() {
        let names = placeholders("{b} {a} {{c}} {b} {d-e} {f_1}");
        assert_eq!(names, vec!["b", "a", "f_1"]);
    }
}
