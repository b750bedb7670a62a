use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, warn};

use super::{truncate_chars, DocumentError, ExtractedDocument, ExtractionLimits};

const PDF_MAGIC: &[u8] = b"%PDF-";
/// Readers accept the header anywhere in the first kilobyte.
const HEADER_SEARCH_WINDOW: usize = 1024;

pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    window
        .windows(PDF_MAGIC.len())
        .any(|candidate| candidate == PDF_MAGIC)
}

/// Extract the text of every page, newline-terminated, then cut to the
/// configured character limit.
pub fn extract_pdf_text(
    bytes: &[u8],
    limits: ExtractionLimits,
) -> Result<ExtractedDocument, DocumentError> {
    if bytes.is_empty() {
        return Err(DocumentError::Empty);
    }
    if !looks_like_pdf(bytes) {
        return Err(DocumentError::NotPdf);
    }

    // pdf-extract panics on some malformed inputs instead of returning Err.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| {
        warn!(size = bytes.len(), "pdf-extract panicked");
        DocumentError::Panicked
    })?
    .map_err(|err| DocumentError::Parse(err.to_string()))?;

    let (full_text, pages_with_text) = join_pages(&pages);
    if full_text.is_empty() {
        return Err(DocumentError::NoText);
    }

    let total_chars = full_text.chars().count();
    let (text, truncated) = truncate_chars(&full_text, limits.max_chars);
    debug!(pages_with_text, total_chars, truncated, "extracted pdf text");

    Ok(ExtractedDocument {
        text: text.to_string(),
        pages_with_text,
        total_chars,
        truncated,
    })
}

pub fn read_pdf_file(
    path: &Path,
    limits: ExtractionLimits,
) -> Result<ExtractedDocument, DocumentError> {
    let bytes = fs::read(path)?;
    extract_pdf_text(&bytes, limits)
}

/// Pages without text are skipped.
fn join_pages(pages: &[String]) -> (String, usize) {
    let mut text = String::new();
    let mut kept = 0;
    for page in pages {
        let page = page.trim();
        if page.is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
        kept += 1;
    }
    (text, kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::testing::{minimal_pdf, multi_page_pdf};

    #[test]
    fn empty_upload_is_rejected() {
        let err = extract_pdf_text(&[], ExtractionLimits::default()).expect_err("empty rejected");
        assert!(matches!(err, DocumentError::Empty));
    }

    #[test]
    fn non_pdf_bytes_are_rejected_before_parsing() {
        let err = extract_pdf_text(b"Abstract\nReferences\n", ExtractionLimits::default())
            .expect_err("plain text rejected");
        assert!(matches!(err, DocumentError::NotPdf));
    }

    #[test]
    fn header_may_follow_leading_garbage() {
        let mut bytes = vec![0u8; 16];
        bytes.extend_from_slice(b"%PDF-1.4\n");
        assert!(looks_like_pdf(&bytes));

        let mut late = vec![b' '; HEADER_SEARCH_WINDOW];
        late.extend_from_slice(b"%PDF-1.4\n");
        assert!(!looks_like_pdf(&late));
    }

    #[test]
    fn join_pages_skips_blank_pages() {
        let pages = ["  Abstract ", "\n\n", "References", ""].map(String::from);
        let (text, pages) = join_pages(&pages);
        assert_eq!(text, "Abstract\nReferences\n");
        assert_eq!(pages, 2);
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let err = read_pdf_file(
            Path::new("/nonexistent/paper.pdf"),
            ExtractionLimits::default(),
        )
        .expect_err("missing file");
        assert!(matches!(err, DocumentError::Io(_)));
    }

    #[test]
    fn extracts_text_from_generated_pdf() {
        let bytes = minimal_pdf(&["Abstract", "Journal of Testing Vol. 3"]);
        let document =
            extract_pdf_text(&bytes, ExtractionLimits::default()).expect("pdf extracts");
        assert!(document.text.contains("Abstract"));
        assert!(document.text.contains("Journal"));
        assert!(!document.truncated);
        assert!(document.pages_with_text >= 1);
    }

    #[test]
    fn multi_page_pdf_keeps_page_boundaries() {
        let bytes = multi_page_pdf(&[&["Alpha page"], &[], &["Beta page"], &["Gamma page"]]);
        let document =
            extract_pdf_text(&bytes, ExtractionLimits::default()).expect("pdf extracts");
        assert_eq!(document.pages_with_text, 3);
        assert_eq!(document.text, "Alpha page\nBeta page\nGamma page\n");
        assert!(!document.truncated);
    }

    #[test]
    fn long_documents_are_truncated() {
        let bytes = minimal_pdf(&["Abstract", "Journal of Testing Vol. 3"]);
        let document = extract_pdf_text(&bytes, ExtractionLimits { max_chars: 5 })
            .expect("pdf extracts");
        assert_eq!(document.text.chars().count(), 5);
        assert!(document.truncated);
        assert!(document.total_chars > 5);
    }
}
