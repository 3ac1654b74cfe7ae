//! The refresh cookie.
//!
//! Only `Path=/` and `HttpOnly` are set; expiry, `Secure` and `SameSite` are
//! left to the browser defaults.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use uuid::Uuid;

pub const REFRESH_COOKIE_NAME: &str = "@NASDAQ-refresh";

/// `Set-Cookie` value carrying a refresh-token id.
pub fn refresh_cookie(id: Uuid) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!("{REFRESH_COOKIE_NAME}={id}; Path=/; HttpOnly"))
}

/// `Set-Cookie` value that blanks the refresh cookie.
pub fn clear_refresh_cookie() -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!("{REFRESH_COOKIE_NAME}=; Path=/; HttpOnly"))
}

/// Read the refresh-token id from the request's `Cookie` headers.
pub fn extract_refresh_cookie(headers: &HeaderMap) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
                continue;
            };
            if key.trim() == REFRESH_COOKIE_NAME {
                return Some(val.trim().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_cookie_is_http_only() -> Result<(), InvalidHeaderValue> {
        let id = Uuid::nil();
        let cookie = refresh_cookie(id)?;
        assert_eq!(
            cookie.to_str().ok(),
            Some("@NASDAQ-refresh=00000000-0000-0000-0000-000000000000; Path=/; HttpOnly")
        );
        Ok(())
    }

    #[test]
    fn clear_refresh_cookie_is_empty() -> Result<(), InvalidHeaderValue> {
        let cookie = clear_refresh_cookie()?;
        assert_eq!(cookie.to_str().ok(), Some("@NASDAQ-refresh=; Path=/; HttpOnly"));
        Ok(())
    }

    #[test]
    fn extract_finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; @NASDAQ-refresh=abc ; lang=pt"),
        );
        assert_eq!(extract_refresh_cookie(&headers), Some("abc".to_string()));
    }

    #[test]
    fn extract_scans_every_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("@NASDAQ-refresh=xyz"));
        assert_eq!(extract_refresh_cookie(&headers), Some("xyz".to_string()));
    }

    #[test]
    fn extract_none_when_missing() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_refresh_cookie(&headers), None);
        headers.insert(COOKIE, HeaderValue::from_static("refresh=abc; flag"));
        assert_eq!(extract_refresh_cookie(&headers), None);
    }
}
