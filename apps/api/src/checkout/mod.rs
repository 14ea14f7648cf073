// Premium checkout: hosted payment session creation.
// All payment-provider calls go through checkout::stripe.

pub mod handlers;
pub mod service;
pub mod stripe;
