//! Response Classification
//!
//! Turns a status code and raw body into either the expected payload or an
//! [`ApiError`]. Kept free of I/O so every shape the service can produce is
//! covered by plain unit tests.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::dto::ErrorBody;
use super::error::{ApiError, ApiResult};

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// The `{error: string}` field, if the body has one
fn error_field(value: &Value) -> Option<String> {
    ErrorBody::deserialize(value).ok().map(|body| body.error)
}

fn rejected(status: u16, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(error_field);
    ApiError::Rejected { status, message }
}

/// Decode a payload-bearing response
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> ApiResult<T> {
    if !is_success(status) {
        return Err(rejected(status, body));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::Malformed(format!("body is not JSON: {}", e)))?;

    match T::deserialize(&value) {
        Ok(payload) => Ok(payload),
        // 2xx carrying an error body is still a refusal
        Err(e) => match error_field(&value) {
            Some(message) => Err(ApiError::Rejected {
                status,
                message: Some(message),
            }),
            None => Err(ApiError::Malformed(e.to_string())),
        },
    }
}

/// Decode an acknowledgement; any 2xx counts, whatever the body holds
pub fn decode_ack(status: u16, body: &[u8]) -> ApiResult<()> {
    if is_success(status) {
        Ok(())
    } else {
        Err(rejected(status, body))
    }
}
