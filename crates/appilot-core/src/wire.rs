//! W3C WebDriver HTTP envelope plumbing.
//!
//! Every WebDriver response carries a JSON body of the form
//! `{"value": ...}`; failures put an object with `error` and `message`
//! fields inside `value` (usually alongside a non-2xx status). This module
//! provides the request helpers that send a command and unwrap that
//! envelope, converting protocol-level failures into [`WireError`].
//!
//! The helpers are transport-only: what the unwrapped `value` means is up to
//! the caller ([`crate::remote`]).

use reqwest::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use crate::element::ElementId;

/// The W3C web element identifier key.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Legacy (JSON Wire Protocol) element key, still emitted by some servers.
const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// The WebDriver error code for an element that could not be located.
const NO_SUCH_ELEMENT: &str = "no such element";

/// Errors raised while talking to the WebDriver endpoint.
#[derive(Error, Debug)]
pub enum WireError {
    /// The HTTP request itself failed (connection refused, timeout, ...).
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    /// The response was valid JSON but missing an expected field.
    #[error("missing '{0}' in response")]
    MissingField(&'static str),

    /// The server reported a WebDriver error code.
    #[error("{error}: {message}")]
    WebDriver { error: String, message: String },
}

impl WireError {
    /// True when the server reported `no such element`.
    ///
    /// The wait loops in the action layer treat this as "not present yet"
    /// and keep polling; every other error is a real failure.
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, WireError::WebDriver { error, .. } if error == NO_SUCH_ELEMENT)
    }
}

/// POST a command body and unwrap the response envelope.
pub async fn post(http: &reqwest::Client, url: &str, body: &Value) -> Result<Value, WireError> {
    let response = http.post(url).json(body).send().await?;
    unwrap_response(response).await
}

/// GET a resource and unwrap the response envelope.
pub async fn get(http: &reqwest::Client, url: &str) -> Result<Value, WireError> {
    let response = http.get(url).send().await?;
    unwrap_response(response).await
}

/// DELETE a resource and unwrap the response envelope.
pub async fn delete(http: &reqwest::Client, url: &str) -> Result<Value, WireError> {
    let response = http.delete(url).send().await?;
    unwrap_response(response).await
}

async fn unwrap_response(response: reqwest::Response) -> Result<Value, WireError> {
    let status = response.status();
    let body = response.text().await?;
    let parsed: Value = if body.trim().is_empty() {
        json!({ "value": null })
    } else {
        serde_json::from_str(&body)?
    };
    unwrap_envelope(status, parsed)
}

/// Unwrap `{"value": ...}`, mapping error payloads to [`WireError::WebDriver`].
pub fn unwrap_envelope(status: StatusCode, mut parsed: Value) -> Result<Value, WireError> {
    let value = parsed
        .get_mut("value")
        .map(Value::take)
        .ok_or(WireError::MissingField("value"))?;

    if let Some(error) = value.get("error").and_then(Value::as_str) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        return Err(WireError::WebDriver {
            error: error.to_string(),
            message,
        });
    }

    if !status.is_success() {
        return Err(WireError::WebDriver {
            error: format!("http status {}", status.as_u16()),
            message: value.to_string(),
        });
    }

    Ok(value)
}

/// Extract the element id from a find-element response value.
pub fn element_id(value: &Value) -> Result<ElementId, WireError> {
    value
        .get(ELEMENT_KEY)
        .or_else(|| value.get(LEGACY_ELEMENT_KEY))
        .and_then(Value::as_str)
        .map(ElementId::new)
        .ok_or(WireError::MissingField(ELEMENT_KEY))
}

/// Extract element ids from a find-elements response value.
pub fn element_ids(value: &Value) -> Result<Vec<ElementId>, WireError> {
    value
        .as_array()
        .ok_or(WireError::MissingField("value array"))?
        .iter()
        .map(element_id)
        .collect()
}
