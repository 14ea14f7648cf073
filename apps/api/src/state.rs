use std::sync::Arc;

use crate::checkout::service::CheckoutService;
use crate::checkout::stripe::StripeClient;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::reading::service::ReadingService;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no mutable state; every request is handled independently.
#[derive(Clone)]
pub struct AppState {
    pub readings: Arc<ReadingService>,
    pub checkout: Arc<CheckoutService>,
    pub config: Config,
}

impl AppState {
    /// Wires the production providers from configuration.
    pub fn from_config(config: Config) -> Self {
        let llm = LlmClient::new(
            config.anthropic_api_key.clone(),
            config.anthropic_api_url.clone(),
        );
        let stripe = StripeClient::new(
            config.stripe_secret_key.clone(),
            config.stripe_api_url.clone(),
        );

        let readings = ReadingService::new(Arc::new(llm), config.reading_extractor.build());
        let checkout = CheckoutService::new(Arc::new(stripe), config.public_base_url.clone());

        Self {
            readings: Arc::new(readings),
            checkout: Arc::new(checkout),
            config,
        }
    }
}
