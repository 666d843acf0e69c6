#[cfg(test)]
pub mod fixtures {
    use std::io::Cursor;

    use docx_rs::{Docx, Paragraph, Run};
    use lopdf::{
        content::{Content, Operation},
        dictionary, Document, Object, Stream,
    };

    pub const MULTIPART_BOUNDARY: &str = "X-QUIZGEN-BOUNDARY";

    /// One part of a multipart form body.
    pub struct FormPart<'a> {
        pub name: &'a str,
        pub filename: Option<&'a str>,
        pub content: &'a [u8],
    }

    impl<'a> FormPart<'a> {
        pub fn file(name: &'a str, filename: &'a str, content: &'a [u8]) -> Self {
            Self {
                name,
                filename: Some(filename),
                content,
            }
        }

        pub fn value(name: &'a str, content: &'a [u8]) -> Self {
            Self {
                name,
                filename: None,
                content,
            }
        }
    }

    /// Encodes `parts` as a `multipart/form-data` body using [`MULTIPART_BOUNDARY`].
    pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
            let disposition = match part.filename {
                Some(filename) => format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    part.name, filename
                ),
                None => format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(part.content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
        body
    }

    /// A DOCX whose body holds one single-run paragraph per entry.
    pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        docx_from_paragraphs(
            paragraphs
                .iter()
                .map(|text| Paragraph::new().add_run(Run::new().add_text(*text)))
                .collect(),
        )
    }

    pub fn docx_from_paragraphs(paragraphs: Vec<Paragraph>) -> Vec<u8> {
        let docx = paragraphs
            .into_iter()
            .fold(Docx::new(), |docx, paragraph| docx.add_paragraph(paragraph));

        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).expect("docx should pack");
        cursor.into_inner()
    }

    /// A PDF with one page per entry; `None` produces a page with no text.
    pub fn pdf_with_pages(pages: &[Option<&str>]) -> Vec<u8> {
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
        for page_text in pages {
            let operations = match page_text {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("content should encode"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("pdf should save");
        bytes
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_multipart_body_layout() {
        let body = multipart_body(&[
            FormPart::file("doc_file", "a.txt", b"hello"),
            FormPart::value("note", b"x"),
        ]);
        let text = String::from_utf8(body).unwrap();

        assert!(text.starts_with(&format!("--{}\r\n", MULTIPART_BOUNDARY)));
        assert!(text.contains("name=\"doc_file\"; filename=\"a.txt\"\r\n"));
        assert!(text.contains("name=\"note\"\r\n\r\nx\r\n"));
        assert!(text.ends_with(&format!("--{}--\r\n", MULTIPART_BOUNDARY)));
    }

    #[test]
    fn test_pdf_fixture_has_requested_pages() {
        let bytes = pdf_with_pages(&[Some("one"), None, Some("three")]);
        let doc = lopdf::Document::load_mem(&bytes).unwrap();

        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_docx_fixture_is_a_zip() {
        let bytes = docx_with_paragraphs(&["A"]);

        assert_eq!(&bytes[..2], b"PK");
    }
}
