/*
[INPUT]:  HTTP client configuration and webhook endpoint
[OUTPUT]: HTTP responses and typed webhook results
[POS]:    HTTP layer - webhook communication
[UPDATE]: When adding new webhook actions or changing client behavior
*/

pub mod client;
pub mod error;
pub mod webhook;

pub use error::{ClonerError, ErrorKind, Result};

pub use client::{ClientConfig, WebhookClient};
