use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use msgdrop_types::Rejection;

use crate::error::ApiError;

/// Raw bearer token lifted from the `Authorization` header.
#[derive(Clone)]
pub struct BearerToken(pub String);

/// Require `Authorization: Bearer <token>` and hand the token to the handler.
/// Whether the token is valid is the store's call, not this layer's.
pub async fn require_bearer(mut req: Request, next: Next) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    match token {
        Some(token) => {
            req.extensions_mut().insert(BearerToken(token));
            next.run(req).await
        }
        None => ApiError::from(Rejection::MissingArgument(vec!["token"])).into_response(),
    }
}
