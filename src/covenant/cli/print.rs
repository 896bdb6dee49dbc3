use chrono::{DateTime, Utc};
use colored::Colorize;
use covenant::api::{CmdMessage, MessageLevel};
use covenant::model::{Artifact, HistoryEntry, Template, TemplateId};
use std::path::Path;
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const LABEL_WIDTH: usize = 6;
const TIME_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_templates(templates: &[TemplateId]) {
    let width = templates
        .iter()
        .map(|id| id.name().width())
        .max()
        .unwrap_or(0);
    for id in templates {
        println!(
            "  {}{}  {}",
            id.name().bold(),
            " ".repeat(width - id.name().width()),
            id.filename().dimmed()
        );
    }
}

pub(super) fn print_template(template: &Template) {
    println!("{}", template.id.name().bold());
    println!("--------------------------------");
    print!("{}", template.text);
    if !template.text.ends_with('\n') {
        println!();
    }
}

pub(super) fn print_placeholders(names: &[String]) {
    if names.is_empty() {
        println!("No placeholders.");
        return;
    }
    for name in names {
        println!("  {}", name);
    }
}

pub(super) fn print_artifacts(artifacts: &[Artifact], base: &Path) {
    for artifact in artifacts {
        println!(
            "  {}{}",
            pad_right(artifact.format.label(), LABEL_WIDTH).yellow(),
            display_path(&artifact.path, base)
        );
    }
}

pub(super) fn print_history(entries: &[HistoryEntry], base: &Path) {
    if entries.is_empty() {
        println!("No documents generated yet.");
        return;
    }

    let name_width = entries
        .iter()
        .map(|e| e.template.name().width())
        .max()
        .unwrap_or(0);

    for (i, entry) in entries.iter().enumerate() {
        let idx = format!("{}. ", i + 1);
        let files: Vec<String> = entry
            .artifacts
            .iter()
            .map(|a| file_name(&a.path))
            .collect();
        println!(
            "  {}{}  {}  {}",
            idx.yellow(),
            pad_right(entry.template.name(), name_width).bold(),
            format_time_ago(entry.created_at).dimmed(),
            files.join(", ")
        );
        if let Some(first) = entry.artifacts.first() {
            let dir = first.path.parent().unwrap_or(Path::new(""));
            println!(
                "  {}{}",
                " ".repeat(idx.width()),
                display_path(dir, base).dimmed()
            );
        }
    }
}

pub(super) fn print_config(values: &[(&str, String)]) {
    let width = values.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    for (key, value) in values {
        println!("{} = {}", pad_right(key, width), value);
    }
}

fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Shows paths under `base` relative to it.
fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
