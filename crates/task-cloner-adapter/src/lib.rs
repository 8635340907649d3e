/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public task cloner adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod backend;
pub mod http;
pub mod types;

// Re-export commonly used types from backend
pub use backend::{Backend, MockBackend, MockBackendConfig, RetryPolicy, WebhookBackend};

// Re-export commonly used types from http
pub use http::{ClientConfig, ClonerError, ErrorKind, Result, WebhookClient};

// Re-export all types
pub use types::*;
