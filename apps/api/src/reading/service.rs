//! Reading Generation: one model call per request, then extract, parse, normalize.
//!
//! Flow: build_reading_prompt → TextGenerator::complete → PayloadExtractor::extract
//!       → serde_json → RawReading::normalize → ReadingResult.
//!
//! No retries, no caching, no shared mutable state between requests.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::reading::extract::PayloadExtractor;
use crate::reading::models::{RawReading, ReadingResult};
use crate::reading::prompts::build_reading_prompt;
use crate::reading::request::ReadingRequest;

pub struct ReadingService {
    generator: Arc<dyn TextGenerator>,
    extractor: Arc<dyn PayloadExtractor>,
}

impl ReadingService {
    pub fn new(generator: Arc<dyn TextGenerator>, extractor: Arc<dyn PayloadExtractor>) -> Self {
        Self {
            generator,
            extractor,
        }
    }

    pub async fn generate(&self, request: &ReadingRequest) -> Result<ReadingResult, AppError> {
        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            has_cv = request.cv_excerpt.is_some(),
            cv_chars = request.cv_excerpt.as_deref().map_or(0, |cv| cv.chars().count()),
            "Generating reading"
        );

        let prompt = build_reading_prompt(&request.birth_date, request.cv_excerpt.as_deref());
        let text = self.generator.complete(&prompt).await?;

        let reading = self.parse(&text)?;
        info!(%request_id, cosmic_score = reading.cosmic_score, "Reading generated");
        Ok(reading)
    }

    /// Turns raw model text into a normalized reading.
    fn parse(&self, text: &str) -> Result<ReadingResult, AppError> {
        let candidate = self
            .extractor
            .extract(text)
            .ok_or_else(|| AppError::ParseFailure("no JSON object in model output".to_string()))?;

        let raw: RawReading = serde_json::from_str(candidate)
            .map_err(|e| AppError::ParseFailure(format!("invalid reading JSON: {e}")))?;

        raw.normalize()
            .map_err(|e| AppError::ParseFailure(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{LlmError, TextGenerator};

    /// Canned model: returns a fixed reply and records prompts.
    pub struct CannedGenerator {
        reply: Result<String, u16>,
        pub calls: AtomicUsize,
        pub prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        pub fn replying(text: impl Into<String>) -> Self {
            Self {
                reply: Ok(text.into()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream unavailable".to_string(),
                }),
            }
        }
    }
}
