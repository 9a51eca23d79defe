use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::error;

use msgdrop_types::Rejection;
use msgdrop_types::api::{DEFAULT_FAIL_MESSAGE, Envelope};

/// A fail envelope paired with the HTTP status it is sent with.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub envelope: Envelope,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            envelope: Envelope::fail(message),
        }
    }

    /// Log the real cause and answer with the generic failure message only.
    pub fn internal(err: impl fmt::Display) -> Self {
        error!("Request failed: {}", err);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, DEFAULT_FAIL_MESSAGE)
    }
}

pub fn status_for(rejection: &Rejection) -> StatusCode {
    match rejection {
        Rejection::DuplicateUser => StatusCode::CONFLICT,
        Rejection::UnknownToken => StatusCode::UNAUTHORIZED,
        Rejection::UserNotActivated => StatusCode::FORBIDDEN,
        Rejection::MissingArgument(_) | Rejection::InvalidArgument(_) => StatusCode::BAD_REQUEST,
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        Self::new(status_for(&rejection), rejection.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

/// Decode a JSON request body. An empty body decodes as the type's default,
/// so missing fields are reported by validation rather than as a parse error.
///
/// Request types keep every field optional, so each top-level field can be
/// decoded on its own to find the ones holding a wrongly typed value.
pub fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let invalid_json = || ApiError::new(StatusCode::BAD_REQUEST, "Invalid JSON!");

    let value: Value = serde_json::from_slice(body).map_err(|_| invalid_json())?;
    let Value::Object(fields) = &value else {
        return Err(invalid_json());
    };
    if let Ok(parsed) = serde_json::from_value::<T>(value.clone()) {
        return Ok(parsed);
    }

    let mut invalid: Vec<String> = fields
        .iter()
        .filter(|(key, field)| {
            let single = Value::Object(Map::from_iter([((*key).clone(), (*field).clone())]));
            serde_json::from_value::<T>(single).is_err()
        })
        .map(|(key, _)| key.clone())
        .collect();
    invalid.sort();

    if invalid.is_empty() {
        Err(invalid_json())
    } else {
        Err(Rejection::InvalidArgument(invalid).into())
    }
}

/// Run blocking store work off the async runtime.
pub async fn blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("spawn_blocking join error: {}", e)))?
        .map_err(ApiError::internal)
}
