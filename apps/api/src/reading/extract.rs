//! Payload extraction: isolates the JSON object inside free-text model output.
//!
//! The default `BraceScanExtractor` is a heuristic, not a grammar-aware parser:
//! it takes everything from the first `{` to the last `}`. Leading or trailing
//! prose is dropped; multiple objects are captured together (and then fail to parse).
//! `StrictJsonExtractor` is for providers that guarantee structured output.

use std::sync::Arc;

/// Finds the JSON candidate inside a model response.
pub trait PayloadExtractor: Send + Sync {
    fn extract<'a>(&self, text: &'a str) -> Option<&'a str>;
}

/// Which extractor the reading service uses. Selected via `READING_EXTRACTOR`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractorKind {
    #[default]
    BraceScan,
    Strict,
}

impl ExtractorKind {
    pub fn build(self) -> Arc<dyn PayloadExtractor> {
        match self {
            ExtractorKind::BraceScan => Arc::new(BraceScanExtractor),
            ExtractorKind::Strict => Arc::new(StrictJsonExtractor),
        }
    }
}

/// Greedy first-`{`-to-last-`}` scan.
pub struct BraceScanExtractor;

impl PayloadExtractor for BraceScanExtractor {
    fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if end < start {
            return None;
        }
        Some(&text[start..=end])
    }
}

/// Accepts only a response that is a single JSON object, optionally fenced.
pub struct StrictJsonExtractor;

impl PayloadExtractor for StrictJsonExtractor {
    fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        let body = strip_json_fences(text);
        (body.starts_with('{') && body.ends_with('}')).then_some(body)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
