//! HTTP client for the reading and checkout endpoints, plus the submit driver
//! that moves a `ReadingFlow` through a request.

use reqwest::{multipart, Client};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::checkout::handlers::CheckoutResponse;
use crate::reading::models::ReadingResult;
use crate::ui::flow::{FlowError, FormDraft, ReadingFlow};

/// Shown when the service gives no usable explanation.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "The stars could not be read right now. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not reach the reading service: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("unexpected response from the reading service: {0}")]
    Decode(String),
}

impl ClientError {
    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Service { message, .. } => message.clone(),
            ClientError::Network(_) | ClientError::Decode(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

#[derive(Clone)]
pub struct ReadingApiClient {
    client: Client,
    base_url: String,
}

impl ReadingApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// POST /analyze with the draft as multipart form data.
    pub async fn analyze(&self, draft: &FormDraft) -> Result<ReadingResult, ClientError> {
        let mut form = multipart::Form::new().text("birthdate", draft.birth_date.clone());
        if let Some(cv) = &draft.cv {
            let part = multipart::Part::bytes(cv.bytes.to_vec()).file_name(cv.file_name.clone());
            form = form.part("cv", part);
        }

        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .multipart(form)
            .send()
            .await?;

        decode_body(response).await
    }

    /// POST /checkout, returning the hosted checkout URL.
    pub async fn checkout(&self, price_id: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(format!("{}/checkout", self.base_url))
            .json(&serde_json::json!({ "priceId": price_id }))
            .send()
            .await?;

        let body: CheckoutResponse = decode_body(response).await?;
        Ok(body.url)
    }
}

/// A non-2xx status or an `error` field in the body is a failure.
async fn decode_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))?;

    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return Err(ClientError::Service {
            status: status.as_u16(),
            message: message.to_string(),
        });
    }
    if !status.is_success() {
        return Err(ClientError::Service {
            status: status.as_u16(),
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        });
    }

    serde_json::from_value(body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Runs one submission: Form → Submitting → Result, or → Failed with a user-facing message.
///
/// Returns `FlowError` only when the flow could not be submitted at all.
pub async fn submit_reading(
    flow: &mut ReadingFlow,
    client: &ReadingApiClient,
) -> Result<(), FlowError> {
    let draft = flow.submit()?;

    match client.analyze(&draft).await {
        Ok(reading) => flow.succeed(reading),
        Err(e) => {
            warn!("Reading request failed: {e}");
            flow.fail(e.user_message())
        }
    }
}
