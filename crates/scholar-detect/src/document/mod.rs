//! PDF text extraction.
//!
//! Only "digital-native" PDFs carry selectable text. Scanned, image-only
//! documents come back as [`DocumentError::NoText`]; no OCR is attempted.

mod pdf;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use pdf::{extract_pdf_text, looks_like_pdf, read_pdf_file};

use serde::Serialize;

/// Characters of extracted text forwarded to the classifier.
pub const DEFAULT_MAX_EXTRACT_CHARS: usize = 4000;
/// Characters of extracted text shown back to the user.
pub const DEFAULT_PREVIEW_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLimits {
    pub max_chars: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_EXTRACT_CHARS,
        }
    }
}

/// Text pulled out of a PDF, already cut down to the extraction limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    pub text: String,
    pub pages_with_text: usize,
    /// Character count before truncation.
    pub total_chars: usize,
    pub truncated: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("uploaded document is empty")]
    Empty,
    #[error("document is not a PDF")]
    NotPdf,
    #[error("unable to parse PDF: {0}")]
    Parse(String),
    #[error("PDF parser crashed while reading the document")]
    Panicked,
    #[error("PDF contains no extractable text (it may be a scanned image)")]
    NoText,
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

/// Whether an upload's declared content type may carry a PDF. Browsers
/// sometimes send `application/octet-stream`, so that passes too and the
/// magic-byte check decides.
pub fn accepts_content_type(content_type: &str) -> bool {
    match content_type.parse::<mime::Mime>() {
        Ok(parsed) => {
            let essence = parsed.essence_str();
            essence == mime::APPLICATION_PDF.essence_str()
                || essence == mime::APPLICATION_OCTET_STREAM.essence_str()
        }
        Err(_) => false,
    }
}

/// Cuts `text` to at most `max_chars` characters, reporting whether
/// anything was dropped.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}

pub fn preview(text: &str, max_chars: usize) -> String {
    truncate_chars(text, max_chars).0.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "Ünïcödé abstract";
        let (cut, truncated) = truncate_chars(text, 3);
        assert_eq!(cut, "Ünï");
        assert!(truncated);

        let (whole, truncated) = truncate_chars(text, 400);
        assert_eq!(whole, text);
        assert!(!truncated);
    }

    #[test]
    fn truncation_at_exact_length_keeps_everything() {
        let (cut, truncated) = truncate_chars("abcd", 4);
        assert_eq!(cut, "abcd");
        assert!(!truncated);
    }

    #[test]
    fn content_type_filter_accepts_pdf_and_octet_stream() {
        assert!(accepts_content_type("application/pdf"));
        assert!(accepts_content_type("application/pdf; name=paper.pdf"));
        assert!(accepts_content_type("application/octet-stream"));
        assert!(!accepts_content_type("text/plain"));
        assert!(!accepts_content_type("not a mime"));
    }

    #[test]
    fn preview_is_bounded() {
        let text = "x".repeat(DEFAULT_PREVIEW_CHARS + 10);
        assert_eq!(preview(&text, DEFAULT_PREVIEW_CHARS).len(), DEFAULT_PREVIEW_CHARS);
    }
}
