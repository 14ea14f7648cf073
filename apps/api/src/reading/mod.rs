// Reading Request Pipeline
// Implements: prompt construction, résumé decoding, single model call,
// JSON payload extraction, output normalization, and the /analyze handler.
// All model calls go through llm_client; nothing here calls Anthropic directly.

pub mod extract;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod request;
pub mod service;
