use super::{ensure_parent, paragraphs};
use crate::error::{CovenantError, Result};
use docx_rs::{Docx, Paragraph, Run};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Writes one DOCX paragraph per line of `text`, in order. Empty lines become empty
/// paragraphs.
pub fn export_document(text: &str, path: &Path) -> Result<PathBuf> {
    ensure_parent(path)?;

    let doc = paragraphs(text).fold(Docx::new(), |doc, line| {
        let paragraph = if line.is_empty() {
            Paragraph::new()
        } else {
            Paragraph::new().add_run(Run::new().add_text(line))
        };
        doc.add_paragraph(paragraph)
    });

    let file = File::create(path).map_err(CovenantError::Io)?;
    doc.build()
        .pack(file)
        .map_err(|e| CovenantError::Document(e.to_string()))?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
    use std::fs;
    use tempfile::TempDir;

    fn paragraph_texts(bytes: &[u8]) -> Vec<String> {
        let doc = read_docx(bytes).unwrap();
        doc.document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(p),
                _ => None,
            })
            .map(|p| {
                let mut text = String::new();
                for pc in &p.children {
                    if let ParagraphChild::Run(run) = pc {
                        for rc in &run.children {
                            if let RunChild::Text(t) = rc {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                text
            })
            .collect()
    }

    #[test]
    fn test_writes_zip_container() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.docx");
        export_document("Hello\n", &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_one_paragraph_per_line_in_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out").join("a.docx");
        export_document("Title\n\nFirst clause\nSecond clause\n", &path).unwrap();

        let texts = paragraph_texts(&fs::read(&path).unwrap());
        assert_eq!(texts, vec!["Title", "", "First clause", "Second clause", ""]);
    }

    #[test]
    fn test_unwritable_parent_is_io_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = export_document("x\n", &blocker.join("a.docx"));
        assert!(matches!(result, Err(CovenantError::Io(_))));
    }
}
