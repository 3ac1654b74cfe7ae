use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tracing::{debug, instrument};

use super::{
    cookie::extract_refresh_cookie, error_response, session_response, types::SessionResponse,
};
use crate::sesame::session::{RefreshOutcome, Sessions};

#[utoipa::path(
    get,
    path = "/refresh-token",
    params(
        ("@NASDAQ-refresh" = String, Cookie, description = "Refresh token id")
    ),
    responses(
        (status = 200, description = "Refresh token rotated", body = SessionResponse),
        (status = 401, description = "Unknown or expired refresh token")
    ),
    tag = "session"
)]
#[instrument(skip(sessions, headers))]
pub async fn refresh_token(headers: HeaderMap, sessions: Extension<Sessions>) -> impl IntoResponse {
    let cookie = extract_refresh_cookie(&headers);

    match sessions.authenticate_by_refresh(cookie.as_deref()).await {
        Ok(RefreshOutcome::Renewed(session)) => session_response(&session),
        Ok(RefreshOutcome::Unknown) => StatusCode::UNAUTHORIZED.into_response(),
        Ok(RefreshOutcome::Expired { rotated }) => {
            debug!("expired refresh token, rotated to {} anyway", rotated.id);
            StatusCode::UNAUTHORIZED.into_response()
        }
        Err(err) => error_response(&err),
    }
}
