// Reading UI controller: the form/submitting/result state machine,
// the HTTP client that drives it, and plain-text rendering of a reading.

pub mod client;
pub mod flow;
pub mod render;
