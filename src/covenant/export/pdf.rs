//! PDF export.
//!
//! Layout is computed first ([`layout`]) and only then drawn with `printpdf`, so
//! pagination can be checked without decoding a PDF. Each input line is one
//! paragraph: its text is word-wrapped to the text width, drawn in Helvetica, and
//! followed by a fixed spacer.

use super::{ensure_parent, paragraphs};
use crate::error::{CovenantError, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const PT_TO_MM: f32 = 25.4 / 72.0;

// A4, in points.
pub const PAGE_WIDTH_PT: f32 = 595.28;
pub const PAGE_HEIGHT_PT: f32 = 841.89;
pub const MARGIN_PT: f32 = 72.0;
pub const FONT_SIZE_PT: f32 = 11.0;
pub const LINE_HEIGHT_PT: f32 = 13.2;
/// Vertical gap after every paragraph.
pub const SPACER_PT: f32 = 8.0;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_CHAR_EM: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    /// Baseline, measured from the bottom of the page.
    pub baseline_pt: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Columns available per line at the configured font size.
pub fn max_columns() -> usize {
    let text_width = PAGE_WIDTH_PT - 2.0 * MARGIN_PT;
    (text_width / (FONT_SIZE_PT * AVG_CHAR_EM)).floor() as usize
}

/// Splits one paragraph into lines no wider than `max_cols` display columns.
/// Whitespace runs collapse to a single space; words longer than a line are broken.
pub fn wrap(paragraph: &str, max_cols: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut cols = 0;

    for word in paragraph.split_whitespace() {
        let word_cols = word.width();
        if cols > 0 && cols + 1 + word_cols > max_cols {
            lines.push(std::mem::take(&mut current));
            cols = 0;
        }

        if word_cols > max_cols {
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if cols > 0 && cols + w > max_cols {
                    lines.push(std::mem::take(&mut current));
                    cols = 0;
                }
                current.push(c);
                cols += w;
            }
            continue;
        }

        if cols > 0 {
            current.push(' ');
            cols += 1;
        }
        current.push_str(word);
        cols += word_cols;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Places every paragraph of `text` on A4 pages.
pub fn layout(text: &str) -> Vec<Page> {
    let max_cols = max_columns();
    let top = PAGE_HEIGHT_PT - MARGIN_PT;

    let mut pages = vec![Page::default()];
    let mut cursor = top;

    for paragraph in paragraphs(text) {
        for line in wrap(paragraph, max_cols) {
            cursor -= LINE_HEIGHT_PT;
            if cursor < MARGIN_PT {
                pages.push(Page::default());
                cursor = top - LINE_HEIGHT_PT;
            }
            if let Some(page) = pages.last_mut() {
                page.lines.push(PlacedLine {
                    text: line,
                    baseline_pt: cursor,
                });
            }
        }
        cursor -= SPACER_PT;
    }
    pages
}

/// Writes `text` as a paginated PDF, one paragraph per line.
pub fn export_pdf(text: &str, path: &Path) -> Result<PathBuf> {
    ensure_parent(path)?;

    let pages = layout(text);
    let width = Mm(PAGE_WIDTH_PT * PT_TO_MM);
    let height = Mm(PAGE_HEIGHT_PT * PT_TO_MM);
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Agreement".to_string());

    let (doc, first_page, first_layer) = PdfDocument::new(title.as_str(), width, height, "Text");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| CovenantError::Pdf(e.to_string()))?;

    for (i, page) in pages.iter().enumerate() {
        let (page_idx, layer_idx) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, "Text")
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);
        for line in page.lines.iter().filter(|l| !l.text.is_empty()) {
            layer.use_text(
                line.text.as_str(),
                FONT_SIZE_PT,
                Mm(MARGIN_PT * PT_TO_MM),
                Mm(line.baseline_pt * PT_TO_MM),
                &font,
            );
        }
    }

    let file = File::create(path).map_err(CovenantError::Io)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| CovenantError::Pdf(e.to_string()))?;
    tracing::debug!(pages = pages.len(), path = %path.display(), "wrote pdf");
    Ok(path.to_path_buf())
}
