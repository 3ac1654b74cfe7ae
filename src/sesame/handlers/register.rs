use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use tracing::{debug, instrument};

use super::{
    error_response, session_response,
    types::{RegisterRequest, SessionResponse},
    valid_email,
};
use crate::sesame::session::Sessions;

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created and session opened", body = SessionResponse),
        (status = 400, description = "Missing payload or invalid email", body = String),
        (status = 409, description = "Email already registered", body = String),
    ),
    tag = "session"
)]
#[instrument(skip(sessions, payload))]
pub async fn register(
    sessions: Extension<Sessions>,
    payload: Option<Json<RegisterRequest>>,
) -> impl IntoResponse {
    let request: RegisterRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    if !valid_email(&request.email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }

    match sessions
        .register(&request.name, &request.email, &request.password)
        .await
    {
        Ok(session) => {
            debug!("registered user {}", session.user.id);
            session_response(&session)
        }
        Err(err) => error_response(&err),
    }
}
