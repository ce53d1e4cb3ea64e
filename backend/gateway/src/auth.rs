//! Admin session cookie and the extractor guarding admin pages.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    http::{header, HeaderMap, StatusCode},
};
use tracing::debug;

use crate::jwt::{verify_access_token, Claims, TokenError};
use crate::state::AppState;

pub const ACCESS_COOKIE: &str = "trame_access_token";

/// `Set-Cookie` value carrying a fresh token.
pub fn session_cookie(token: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie =
        format!("{ACCESS_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value deleting the session.
pub fn clear_session_cookie() -> String {
    format!("{ACCESS_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// Value of cookie `name` across all `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[derive(Debug, PartialEq, Eq)]
pub enum SessionRejection {
    Missing,
    Invalid(TokenError),
}

impl axum::response::IntoResponse for SessionRejection {
    fn into_response(self) -> axum::response::Response {
        let message = match self {
            SessionRejection::Missing => "Missing session",
            SessionRejection::Invalid(_) => "Invalid session",
        };
        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}

/// A verified admin session. Handlers still compare `access_name` with the
/// area they serve.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub access_name: String,
    pub claims: Claims,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = SessionRejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = cookie_value(&parts.headers, ACCESS_COOKIE)
            .filter(|token| !token.is_empty())
            .ok_or(SessionRejection::Missing)?;

        match verify_access_token(token, state.jwt_secret()) {
            Ok(claims) => Ok(AdminSession {
                access_name: claims.sub.clone(),
                claims,
            }),
            Err(e) => {
                debug!(error = %e, "Rejected admin session");
                Err(SessionRejection::Invalid(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn cookie_attributes() {
        assert_eq!(
            session_cookie("tok", 172800, false),
            "trame_access_token=tok; HttpOnly; SameSite=Lax; Path=/; Max-Age=172800"
        );
        assert!(session_cookie("tok", 1, true).ends_with("; Secure"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1; b=2"));
        headers.append(header::COOKIE, HeaderValue::from_static("trame_access_token=x.y.z"));
        assert_eq!(cookie_value(&headers, ACCESS_COOKIE), Some("x.y.z"));
        assert_eq!(cookie_value(&headers, "b"), Some("2"));
        assert_eq!(cookie_value(&headers, "c"), None);
    }
}
