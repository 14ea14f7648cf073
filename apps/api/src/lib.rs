pub mod checkout;
pub mod config;
pub mod errors;
pub mod llm_client;
pub mod reading;
pub mod routes;
pub mod state;
pub mod ui;
