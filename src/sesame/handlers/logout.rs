use axum::{
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
};
use tracing::{debug, error, instrument};

use super::cookie::{clear_refresh_cookie, extract_refresh_cookie};

#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 200, description = "Refresh cookie cleared")
    ),
    tag = "session"
)]
#[instrument(skip(headers))]
pub async fn logout(headers: HeaderMap) -> impl IntoResponse {
    // The server-side refresh token is left in place; only the cookie goes.
    if let Some(id) = extract_refresh_cookie(&headers) {
        debug!("clearing refresh cookie {id}");
    }

    let mut response_headers = HeaderMap::new();
    match clear_refresh_cookie() {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build refresh cookie: {err}"),
    }

    (StatusCode::OK, response_headers)
}
