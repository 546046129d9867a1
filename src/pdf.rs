//! Text extraction from prescription documents.

use std::path::Path;

use anyhow::{Context, Result};
use lopdf::Document;

/// Whether `path` looks like a PDF (by extension, case-insensitive)
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Extract the text of every page, in page order, joined with newlines.
///
/// A page whose text cannot be decoded contributes an empty string so the
/// rest of the document is still usable.
pub fn read_pdf_text(path: &Path) -> Result<String> {
    let doc = Document::load(path)
        .with_context(|| format!("Failed to load PDF {}", path.display()))?;

    let pages: Vec<String> = doc
        .get_pages()
        .keys()
        .map(|&page_number| match doc.extract_text(&[page_number]) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    page = page_number,
                    error = %e,
                    "could not extract page text"
                );
                String::new()
            }
        })
        .collect();

    tracing::debug!(path = %path.display(), pages = pages.len(), "extracted PDF text");

    Ok(pages.join("\n"))
}

/// Read a document's text: PDFs through `read_pdf_text`, anything else as UTF-8 text.
pub fn read_document_text(path: &Path) -> Result<String> {
    if is_pdf(path) {
        read_pdf_text(path)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};
    use tempfile::TempDir;

    /// Write a PDF with one page per entry of `page_texts`
    pub(crate) fn write_pdf(path: &Path, page_texts: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![50.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_is_pdf_ignores_case() {
        assert!(is_pdf(Path::new("rezept.pdf")));
        assert!(is_pdf(Path::new("REZEPT.PDF")));
        assert!(!is_pdf(Path::new("rezept.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }

    #[test]
    fn test_read_pdf_text_joins_pages_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rezept.pdf");
        write_pdf(&path, &["Behandlungstermine", "Terminabsage"]);

        let text = read_pdf_text(&path).unwrap();

        let first = text.find("Behandlungstermine").expect("first page text");
        let second = text.find("Terminabsage").expect("second page text");
        assert!(first < second, "pages out of order: {:?}", text);
        assert!(text[first..second].contains('\n'));
    }

    #[test]
    fn test_read_pdf_text_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_pdf_text(&dir.path().join("missing.pdf")).unwrap_err();
        assert!(err.to_string().contains("missing.pdf"), "got: {:#}", err);
    }

    #[test]
    fn test_read_document_text_plain_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rezept.txt");
        std::fs::write(&path, "Di27.01.202616:40KG ZNS (Katja)").unwrap();

        let text = read_document_text(&path).unwrap();

        assert_eq!(termine_core::extract(&text).len(), 1);
    }
}
