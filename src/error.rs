// Typed errors with thiserror. Only the JS boundary can fail; the state machines never do.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Boundary error types.
#[derive(Error, Debug)]
pub enum UiError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid feed payload: {0}")]
    InvalidFeed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        UiError::Serialization(err.to_string())
    }
}

impl From<UiError> for JsValue {
    fn from(err: UiError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
