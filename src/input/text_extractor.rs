//! Text extraction from various file formats
//!
//! Extraction never fails: undecodable bytes are dropped, unreadable PDFs
//! and unknown formats produce an empty string.

use crate::input::file_detector::FileType;
use log::warn;
use pulldown_cmark::{Event, Parser, Tag};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> String;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        // pdf-extract panics on some malformed documents
        match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Failed to extract text from PDF: {}", e);
                String::new()
            }
            Err(_) => {
                warn!("PDF parser panicked; treating document as empty");
                String::new()
            }
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        decode_utf8_dropping_invalid(bytes)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        let markdown = decode_utf8_dropping_invalid(bytes);
        let mut text = String::with_capacity(markdown.len());

        for event in Parser::new(&markdown) {
            match event {
                Event::Text(t) | Event::Code(t) | Event::Html(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak | Event::Rule => text.push('\n'),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Lossy UTF-8 decoding that drops invalid sequences instead of replacing them
pub fn decode_utf8_dropping_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// Extract text from `bytes` using the strategy implied by `file_name`
pub fn extract_text(bytes: &[u8], file_name: &str) -> String {
    match FileType::from_file_name(file_name) {
        FileType::Pdf => PdfExtractor.extract(bytes),
        FileType::Text => PlainTextExtractor.extract(bytes),
        FileType::Markdown => MarkdownExtractor.extract(bytes),
        FileType::Unknown => {
            warn!("Unsupported file type for '{}', using empty text", file_name);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_drops_invalid_bytes() {
        let bytes = b"Python \xff\xfeand SQL\xc3";
        assert_eq!(extract_text(bytes, "resume.txt"), "Python and SQL");
    }

    #[test]
    fn test_plain_text_keeps_valid_unicode() {
        let text = "Résumé – Müller";
        assert_eq!(extract_text(text.as_bytes(), "resume.txt"), text);
    }

    #[test]
    fn test_unknown_format_is_empty() {
        assert_eq!(extract_text(b"Python", "resume.docx"), "");
        assert_eq!(extract_text(b"Python", "resume"), "");
    }

    #[test]
    fn test_garbage_pdf_is_empty() {
        assert_eq!(extract_text(b"not really a pdf", "resume.pdf"), "");
    }

    #[test]
    fn test_pdf_pages_in_order_with_blank_page() {
        // pages: "Python SQL", blank, "Docker Rust"
        let bytes = std::fs::read("tests/fixtures/three_pages.pdf").unwrap();
        let text = extract_text(&bytes, "cv.pdf");

        let python = text.find("Python").unwrap();
        let sql = text.find("SQL").unwrap();
        let docker = text.find("Docker").unwrap();
        let rust = text.find("Rust").unwrap();
        assert!(python < sql && sql < docker && docker < rust);
    }

    #[test]
    fn test_markdown_strips_markup() {
        let md = "# Jane Doe\n\n**Skills**: `Rust`, *Python*\n\n- Docker\n- AWS\n";
        let text = extract_text(md.as_bytes(), "resume.md");
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Skills: Rust, Python"));
        assert!(text.contains("Docker"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let bytes = b"Kubernetes and Terraform";
        assert_eq!(extract_text(bytes, "a.txt"), extract_text(bytes, "a.txt"));
    }
}
