//! Stripe Checkout client: the single point of entry for payment-provider calls.
//!
//! Sessions are created with one form-encoded POST to `/checkout/sessions`.
//! No retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("checkout session {0} has no redirect URL")]
    MissingUrl(String),
}

/// Everything needed to create a single-line-item hosted checkout session.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionParams {
    pub currency: String,
    /// Minor currency units.
    pub unit_amount: u32,
    pub quantity: u32,
    pub product_name: String,
    pub product_description: String,
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutSessionParams {
    /// Stripe's bracketed form encoding of the session parameters.
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][price_data][currency]", self.currency.clone()),
            (
                "line_items[0][price_data][product_data][name]",
                self.product_name.clone(),
            ),
            (
                "line_items[0][price_data][product_data][description]",
                self.product_description.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                self.unit_amount.to_string(),
            ),
            ("line_items[0][quantity]", self.quantity.to_string()),
            ("mode", "payment".to_string()),
            ("success_url", self.success_url.clone()),
            ("cancel_url", self.cancel_url.clone()),
        ]
    }
}

/// A created hosted checkout session.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Creates hosted payment sessions. Carried behind `Arc<dyn PaymentProvider>`
/// so tests can substitute a recording fake.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, PaymentError>;
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
    api_url: String,
}

impl StripeClient {
    pub fn new(secret_key: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            secret_key,
            api_url,
        }
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, PaymentError> {
        let response = self
            .client
            .post(format!("{}/checkout/sessions", self.api_url))
            .bearer_auth(&self.secret_key)
            .form(&params.to_form())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: SessionResponse = response.json().await?;
        debug!("Checkout session created: {}", session.id);

        match session.url {
            Some(url) => Ok(CheckoutSession {
                id: session.id,
                url,
            }),
            None => Err(PaymentError::MissingUrl(session.id)),
        }
    }
}
