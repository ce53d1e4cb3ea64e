//! Admin area: password login, protected dashboard and logout.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use anyhow::anyhow;
use chrono::{DateTime, Duration};
use logging::{AuditEvent, AuditLogger};
use serde::Deserialize;

use crate::assets::AssetUrls;
use crate::auth::{clear_session_cookie, session_cookie, AdminSession};
use crate::context::PageContext;
use crate::error::{AppError, AppResult};
use crate::jwt::create_access_token;
use crate::render::page;
use crate::state::AppState;

const ADMIN_PREFIX: &str = "/trame/admin/";
const UNKNOWN_ACCESS: &str = "Unknown";

fn login_url(access_name: &str) -> String {
    format!("{ADMIN_PREFIX}{access_name}")
}

/// Session lifetime, or an error when `hours` is outside what a timestamp can hold.
fn session_ttl(hours: u64) -> AppResult<Duration> {
    i64::try_from(hours)
        .ok()
        .and_then(Duration::try_hours)
        .ok_or_else(|| AppError::Internal(anyhow!("token lifetime out of range: {hours} hours")))
}

fn dashboard_url(access_name: &str) -> String {
    format!("{ADMIN_PREFIX}{access_name}/dashboard")
}

/// Access name from a referring login page URL (`.../trame/admin/{name}`).
pub fn access_name_from_referer(referer: &str) -> Option<&str> {
    let (_, rest) = referer.split_once(ADMIN_PREFIX)?;
    let name = rest.split(['/', '?', '#']).next()?;
    (!name.is_empty()).then_some(name)
}

/// Byte comparison whose duration does not depend on where inputs differ.
fn passwords_match(given: &str, expected: &str) -> bool {
    let (given, expected) = (given.as_bytes(), expected.as_bytes());
    given.len() == expected.len()
        && given
            .iter()
            .zip(expected)
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}

#[derive(Template)]
#[template(path = "trame/admin.html")]
struct AdminTemplate {
    deps: AssetUrls,
    default_theme: String,
    access_name: String,
    access_name_slug: String,
    access_makes_sense: bool,
    /// Empty when there is nothing to report.
    error: String,
}

impl AdminTemplate {
    fn new(ctx: &PageContext, state: &AppState, slug: &str) -> Self {
        let admin = state.admin(slug);
        AdminTemplate {
            deps: ctx.deps,
            default_theme: ctx.default_theme(),
            access_name: admin
                .map(|a| a.display_name.clone())
                .unwrap_or_else(|| UNKNOWN_ACCESS.to_string()),
            access_name_slug: slug.to_string(),
            access_makes_sense: admin.is_some(),
            error: String::new(),
        }
    }
}

/// Handler for `GET /trame/admin/:access_name`
pub async fn login_page(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(access_name): Path<String>,
) -> AppResult<Response> {
    Ok(page(&AdminTemplate::new(&ctx, &state, &access_name))?.into_response())
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
    #[serde(default)]
    pub access_name: Option<String>,
}

/// Handler for `POST /trame/admin/login`
pub async fn login_submit(
    State(state): State<AppState>,
    ctx: PageContext,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let access_name = form
        .access_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .or_else(|| access_name_from_referer(referer))
        .unwrap_or_default()
        .to_string();

    let Some(admin) = state.admin(&access_name) else {
        AuditLogger::log_event(AuditEvent::LoginFailed {
            access_name,
            reason: "unknown access".into(),
        });
        return Err(AppError::BadRequest("Invalid access".into()));
    };

    if !passwords_match(&form.password, &admin.password) {
        AuditLogger::log_event(AuditEvent::LoginFailed {
            access_name: access_name.clone(),
            reason: "Invalid password".into(),
        });
        let mut template = AdminTemplate::new(&ctx, &state, &access_name);
        template.error = "Invalid password".into();
        return Ok(page(&template)?.into_response());
    }

    let hours = state.config().auth.token_expire_hours;
    let ttl = session_ttl(hours)?;
    let token = create_access_token(&access_name, ttl, state.jwt_secret())
        .map_err(|e| AppError::Internal(e.into()))?;
    let cookie = session_cookie(&token, hours.saturating_mul(3600), state.config().auth.cookie_secure);

    AuditLogger::log_event(AuditEvent::LoginSucceeded {
        access_name: access_name.clone(),
    });
    Ok((
        [(header::SET_COOKIE, cookie)],
        Redirect::to(&dashboard_url(&access_name)),
    )
        .into_response())
}

#[derive(Template)]
#[template(path = "trame/admin_dashboard.html")]
struct DashboardTemplate {
    deps: AssetUrls,
    default_theme: String,
    access_name: String,
    access_name_slug: String,
    expires_utc: String,
}

/// Handler for `GET /trame/admin/:access_name/dashboard`
pub async fn dashboard(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(access_name): Path<String>,
    session: Option<AdminSession>,
) -> AppResult<Response> {
    let Some(session) = session.filter(|s| s.access_name == access_name) else {
        AuditLogger::log_event(AuditEvent::AccessDenied {
            access_name: access_name.clone(),
            path: dashboard_url(&access_name),
        });
        return Ok(Redirect::to(&login_url(&access_name)).into_response());
    };

    let expires_utc = DateTime::from_timestamp(session.claims.exp, 0)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default();
    let template = DashboardTemplate {
        deps: ctx.deps,
        default_theme: ctx.default_theme(),
        access_name: state
            .admin(&access_name)
            .map(|a| a.display_name.clone())
            .unwrap_or_else(|| UNKNOWN_ACCESS.to_string()),
        access_name_slug: access_name,
        expires_utc,
    };
    Ok(page(&template)?.into_response())
}

/// Handler for `GET /trame/admin/:access_name/logout`
pub async fn logout(Path(access_name): Path<String>) -> Response {
    AuditLogger::log_event(AuditEvent::Logout {
        access_name: access_name.clone(),
    });
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to(&login_url(&access_name)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referer_parsing() {
        assert_eq!(
            access_name_from_referer("https://attam.org/trame/admin/znd"),
            Some("znd")
        );
        assert_eq!(
            access_name_from_referer("http://localhost:8000/trame/admin/sel?x=1"),
            Some("sel")
        );
        assert_eq!(
            access_name_from_referer("http://localhost/trame/admin/sel/dashboard"),
            Some("sel")
        );
        assert_eq!(access_name_from_referer("http://localhost/trame/admin/"), None);
        assert_eq!(access_name_from_referer("http://localhost/routes"), None);
    }

    #[test]
    fn password_comparison() {
        assert!(passwords_match("hunter2", "hunter2"));
        assert!(!passwords_match("hunter3", "hunter2"));
        assert!(!passwords_match("hunter", "hunter2"));
        assert!(!passwords_match("", "x"));
    }

    #[test]
    fn session_ttl_bounds() {
        assert_eq!(session_ttl(48).unwrap(), Duration::hours(48));
        assert!(session_ttl(10_000_000_000_000).is_err());
        assert!(session_ttl(u64::MAX).is_err());
    }
}
