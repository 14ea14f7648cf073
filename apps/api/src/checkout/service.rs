//! Premium checkout: builds the fixed single-product session and returns its redirect URL.

use std::sync::Arc;

use tracing::info;

use crate::checkout::stripe::{CheckoutSessionParams, PaymentProvider};
use crate::errors::AppError;

pub const PREMIUM_CURRENCY: &str = "eur";
/// Price in minor currency units.
pub const PREMIUM_UNIT_AMOUNT: u32 = 499;
pub const PREMIUM_NAME: &str = "AstroPunch Premium Report";
pub const PREMIUM_DESCRIPTION: &str =
    "Complete astro-punch analysis with personalized advice and PDF";

/// The products that can be bought. Only one exists, so every selector maps to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    PremiumReport,
}

impl Product {
    pub fn from_selector(_selector: Option<&str>) -> Self {
        Product::PremiumReport
    }

    pub fn unit_amount(self) -> u32 {
        match self {
            Product::PremiumReport => PREMIUM_UNIT_AMOUNT,
        }
    }
}

pub struct CheckoutService {
    provider: Arc<dyn PaymentProvider>,
    base_url: String,
}

impl CheckoutService {
    pub fn new(provider: Arc<dyn PaymentProvider>, base_url: String) -> Self {
        Self { provider, base_url }
    }

    /// Parameters for a session buying `product`.
    pub fn session_params(&self, product: Product) -> CheckoutSessionParams {
        CheckoutSessionParams {
            currency: PREMIUM_CURRENCY.to_string(),
            unit_amount: product.unit_amount(),
            quantity: 1,
            product_name: PREMIUM_NAME.to_string(),
            product_description: PREMIUM_DESCRIPTION.to_string(),
            success_url: format!("{}?premium=success", self.base_url),
            cancel_url: format!("{}?premium=cancel", self.base_url),
        }
    }

    /// Creates one hosted session and returns the URL to redirect the buyer to.
    pub async fn create_session(&self, selector: Option<&str>) -> Result<String, AppError> {
        let product = Product::from_selector(selector);
        let params = self.session_params(product);
        let session = self.provider.create_checkout_session(&params).await?;
        info!("Checkout session {} created for {:?}", session.id, product);
        Ok(session.url)
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::checkout::stripe::{
        CheckoutSession, CheckoutSessionParams, PaymentError, PaymentProvider,
    };

    /// Records every session request; optionally fails.
    #[derive(Default)]
    pub struct RecordingProvider {
        pub fail: bool,
        pub requests: Mutex<Vec<CheckoutSessionParams>>,
    }

    impl RecordingProvider {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl PaymentProvider for RecordingProvider {
        async fn create_checkout_session(
            &self,
            params: &CheckoutSessionParams,
        ) -> Result<CheckoutSession, PaymentError> {
            self.requests.lock().unwrap().push(params.clone());
            if self.fail {
                return Err(PaymentError::Api {
                    status: 402,
                    message: "card declined".to_string(),
                });
            }
            Ok(CheckoutSession {
                id: "cs_fake".to_string(),
                url: "https://checkout.example/cs_fake".to_string(),
            })
        }
    }
}
