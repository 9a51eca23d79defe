use axum::{
    Extension, Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse,
};

use msgdrop_db::store::{listing_reply, new_message_reply};
use msgdrop_types::api::{Envelope, NewMessageRequest};

use crate::error::{ApiError, blocking, parse_body, status_for};
use crate::middleware::BearerToken;
use crate::users::AppState;

/// `POST /messages`: store a message for the owner of `token`.
pub async fn post_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let msg = parse_body::<NewMessageRequest>(&body)?.validate()?;

    // Token hashing is deliberately slow; keep it off the async runtime
    let outcome = blocking(move || state.db.submit_message(&msg)).await?;

    let status = match &outcome {
        Ok(_) => StatusCode::CREATED,
        Err(rejection) => status_for(rejection),
    };
    let envelope =
        Envelope::from_reply(new_message_reply(outcome), "message_id").map_err(ApiError::internal)?;

    Ok((status, Json(envelope)))
}

/// `GET /messages`: the caller's unarchived messages.
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = blocking(move || state.db.list_messages(&token)).await?;

    let status = match &outcome {
        Ok(_) => StatusCode::OK,
        Err(rejection) => status_for(rejection),
    };
    let envelope =
        Envelope::from_reply(listing_reply(outcome), "messages").map_err(ApiError::internal)?;

    Ok((status, Json(envelope)))
}
