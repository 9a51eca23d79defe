use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};

use msgdrop_db::Database;
use msgdrop_types::api::{CreateUserRequest, Envelope};

use crate::error::{ApiError, blocking, parse_body};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

/// `POST /users`: create a user and hand back its token, once.
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let name = parse_body::<CreateUserRequest>(&body)?.validate()?;

    let issued = blocking(move || state.db.create_user(&name)).await??;

    let mut envelope = Envelope::ok("user created");
    envelope.append_data("token", issued.token);
    Ok((StatusCode::CREATED, Json(envelope)))
}
