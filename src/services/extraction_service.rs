use docx_rs::{DocumentChild, InsertChild, ParagraphChild, Run, RunChild};

use crate::{
    errors::ExtractionError,
    models::{DocumentKind, Upload},
};

/// Extracts plain text from an upload, dispatching on its filename suffix.
///
/// Every parser failure is converted into an [`ExtractionError`]; nothing
/// panics or escapes this boundary in another form. Text that is empty after
/// trimming is reported as [`ExtractionError::Empty`].
pub fn extract_text(upload: &Upload) -> Result<String, ExtractionError> {
    let kind = upload.kind()?;

    let text = match kind {
        DocumentKind::Pdf => extract_pdf(&upload.bytes)?,
        DocumentKind::Docx => extract_docx(&upload.bytes)?,
        DocumentKind::Text => extract_plain_text(&upload.bytes)?,
    };

    log::info!(
        "Extracted {} chars from {} upload '{}'",
        text.chars().count(),
        kind,
        upload.filename
    );

    if text.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }

    Ok(text)
}

/// Concatenates page text in page order. A page that yields nothing, or
/// fails to decode, contributes an empty string.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let document =
        lopdf::Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let mut text = String::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                log::warn!("No text extracted from PDF page {}: {}", page_number, e);
            }
        }
    }

    Ok(text)
}

/// Body paragraphs in document order, joined with `\n`.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(&paragraph.children)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    push_paragraph_children(children, &mut text);
    text
}

/// Hyperlinks nest paragraph children; tracked insertions hold runs.
/// Deleted text is skipped.
fn push_paragraph_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, text),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for insert_child in &insert.children {
                    if let InsertChild::Run(run) = insert_child {
                        push_run(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

pub fn extract_plain_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| ExtractionError::InvalidUtf8(e.to_string()))
}
