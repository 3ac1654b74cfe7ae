//! HTTP handlers and the mapping from session outcomes to responses.

pub mod cookie;
pub mod health;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod types;

use axum::{
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use regex::Regex;
use tracing::error;

use self::{cookie::refresh_cookie, types::SessionResponse};
use super::session::{Session, SessionError};

/// Lightweight email sanity check; case is left untouched.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// 200 with `{user, token}` and the refresh cookie for `session`.
pub(crate) fn session_response(session: &Session) -> Response {
    let cookie = match refresh_cookie(session.refresh_token.id) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build refresh cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    (
        StatusCode::OK,
        headers,
        Json(SessionResponse::from(session)),
    )
        .into_response()
}

pub(crate) fn error_response(err: &SessionError) -> Response {
    let status = match err {
        SessionError::DuplicateEmail => StatusCode::CONFLICT,
        SessionError::EmailNotFound => StatusCode::NOT_FOUND,
        SessionError::WrongPassword => StatusCode::UNAUTHORIZED,
        SessionError::Internal(err) => {
            error!("Session flow failed: {err:#}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
                .into_response();
        }
    };

    (status, err.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("ana@x.com"));
        assert!(valid_email("Ana.Souza@Example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-at.example.com"));
        assert!(!valid_email("missing-domain@"));
        assert!(!valid_email("spa ce@x.com"));
    }

    #[test]
    fn error_response_maps_status() {
        let cases = [
            (SessionError::DuplicateEmail, StatusCode::CONFLICT),
            (SessionError::EmailNotFound, StatusCode::NOT_FOUND),
            (SessionError::WrongPassword, StatusCode::UNAUTHORIZED),
            (
                SessionError::Internal(anyhow!("db down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(&err).status(), status);
        }
    }
}
