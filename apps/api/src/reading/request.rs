//! Reading requests and résumé decoding.

use bytes::Bytes;
use tracing::warn;

/// Maximum number of résumé characters forwarded to the model.
pub const MAX_CV_CHARS: usize = 3000;

/// A validated request for one reading. Request-scoped; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingRequest {
    pub birth_date: String,
    pub cv_excerpt: Option<String>,
}

impl ReadingRequest {
    /// Builds a request, truncating the résumé text to `MAX_CV_CHARS`.
    /// Returns `None` when the birth date is empty or whitespace.
    pub fn new(birth_date: &str, cv_text: Option<String>) -> Option<Self> {
        let birth_date = birth_date.trim();
        if birth_date.is_empty() {
            return None;
        }

        let request = Self {
            birth_date: birth_date.to_string(),
            cv_excerpt: None,
        };
        Some(request.with_cv(cv_text))
    }

    /// Attaches résumé text, truncated to `MAX_CV_CHARS`. Blank text is dropped.
    pub fn with_cv(mut self, cv_text: Option<String>) -> Self {
        self.cv_excerpt = cv_text
            .filter(|text| !text.trim().is_empty())
            .map(|text| truncate_chars(&text, MAX_CV_CHARS).to_string());
        self
    }
}

/// Returns at most `max` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}

/// Best-effort text decoding of an uploaded résumé.
///
/// PDFs are text-extracted on a blocking thread; anything else, or a PDF that
/// fails to extract, is decoded as lossy UTF-8. Empty uploads yield `None`.
pub async fn decode_cv(bytes: Bytes) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }

    if looks_like_pdf(&bytes) {
        let pdf = bytes.clone();
        match tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf)).await {
            Ok(Ok(text)) => return Some(text),
            Ok(Err(e)) => warn!("PDF text extraction failed, decoding raw bytes: {e:?}"),
            Err(e) => warn!("PDF extraction task failed, decoding raw bytes: {e:?}"),
        }
    }

    Some(String::from_utf8_lossy(&bytes).into_owned())
}
