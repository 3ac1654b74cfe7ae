use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use tracing::{debug, instrument};

use super::{
    error_response, session_response,
    types::{LoginRequest, SessionResponse},
};
use crate::sesame::session::Sessions;

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened, previous refresh tokens revoked", body = SessionResponse),
        (status = 400, description = "Missing payload", body = String),
        (status = 401, description = "Incorrect password", body = String),
        (status = 404, description = "Email not registered", body = String),
    ),
    tag = "session"
)]
#[instrument(skip(sessions, payload))]
pub async fn login(
    sessions: Extension<Sessions>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    match sessions.login(&request.email, &request.password).await {
        Ok(session) => {
            debug!("user {} logged in", session.user.id);
            session_response(&session)
        }
        Err(err) => {
            debug!("login rejected: {err}");
            error_response(&err)
        }
    }
}
