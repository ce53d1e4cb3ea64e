//! Site pages: landing, route index, template showcase and fonts.

use askama::Template;
use axum::{extract::Query, response::Html};
use serde::Deserialize;

use crate::assets::{AssetSource, AssetUrls};
use crate::context::PageContext;
use crate::error::{AppError, AppResult};
use crate::health::utc_now_string;
use crate::render::page;

/// Themes shown side by side on the showcase page.
const SHOWCASE_THEMES: [&str; 6] = ["anchor", "pan-light", "day", "night", "light", "dark"];

pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

const fn link(href: &'static str, label: &'static str) -> NavLink {
    NavLink { href, label }
}

pub struct FontSample {
    pub name: &'static str,
    pub family: &'static str,
}

fn parse_source(value: Option<&str>) -> AppResult<AssetSource> {
    value
        .unwrap_or("local")
        .parse::<AssetSource>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

#[derive(Debug, Deserialize)]
pub struct LandingQuery {
    pub deps_from: Option<String>,
}

#[derive(Template)]
#[template(path = "landing.html")]
struct LandingTemplate {
    deps: AssetUrls,
    default_theme: String,
    deps_from: AssetSource,
    domain_name: String,
    /// Empty when the brand has none.
    logo: String,
}

/// Handler for `GET /`
pub async fn landing(ctx: PageContext, Query(query): Query<LandingQuery>) -> AppResult<Html<String>> {
    let source = parse_source(query.deps_from.as_deref())?;
    let ctx = ctx.with_source(source);
    page(&LandingTemplate {
        deps: ctx.deps,
        default_theme: ctx.default_theme(),
        deps_from: source,
        domain_name: ctx.domain.name().to_string(),
        logo: ctx.domain.logo().unwrap_or_default().to_string(),
    })
}

#[derive(Template)]
#[template(path = "routes.html")]
struct RoutesTemplate {
    deps: AssetUrls,
    default_theme: String,
    host: String,
    usage: [NavLink; 3],
    admin: [NavLink; 3],
    dev: [NavLink; 3],
}

/// Handler for `GET /routes`
pub async fn routes(ctx: PageContext) -> AppResult<Html<String>> {
    page(&RoutesTemplate {
        deps: ctx.deps,
        default_theme: ctx.default_theme(),
        host: ctx.host,
        usage: [
            link("/trame/path/alidade/batiment_guepard.jpg", "🐆 Trame Guépard"),
            link("/trame/path/alidade/nav_et_trigo.md", "📝 Trame Editor"),
            link("/fonts", "🎨 Fonts"),
        ],
        admin: [
            link("/trame/admin/username", "🔒 Admin Access"),
            link("/trame/admin/username/dashboard", "🔒 Admin Dashboard"),
            link("/trame/admin/username/logout", "🔒 Logout"),
        ],
        dev: [
            link("/template", "🎨 Template"),
            link("/health", "🛡️ Health"),
            link("/trame/debug", "⚙️ Trame Debug"),
        ],
    })
}

#[derive(Debug, Deserialize)]
pub struct ShowcaseQuery {
    pub deps: Option<String>,
}

#[derive(Template)]
#[template(path = "template_showcase.html")]
struct ShowcaseTemplate {
    deps: AssetUrls,
    default_theme: String,
    deps_from: AssetSource,
    themes: [&'static str; 6],
}

/// Handler for `GET /template`
pub async fn template_showcase(
    ctx: PageContext,
    Query(query): Query<ShowcaseQuery>,
) -> AppResult<Html<String>> {
    let source = parse_source(query.deps.as_deref())?;
    let ctx = ctx.with_source(source);
    page(&ShowcaseTemplate {
        deps: ctx.deps,
        default_theme: ctx.default_theme(),
        deps_from: source,
        themes: SHOWCASE_THEMES,
    })
}

#[derive(Template)]
#[template(path = "fonts.html")]
struct FontsTemplate {
    deps: AssetUrls,
    default_theme: String,
    message: &'static str,
    host: String,
    time_utc: String,
    samples: Vec<FontSample>,
}

/// Handler for `GET /fonts`
pub async fn fonts(ctx: PageContext) -> AppResult<Html<String>> {
    let mut samples: Vec<FontSample> = ["Outfit", "Lexend", "EB Garamond", "Dancing Script", "Lora", "JetBrains Mono"]
        .into_iter()
        .map(|name| FontSample { name, family: name })
        .collect();
    samples.push(FontSample {
        name: "OpenDyslexic",
        family: attam_theme::FontType::Dyslexic.stack().body,
    });

    page(&FontsTemplate {
        deps: ctx.deps,
        default_theme: ctx.default_theme(),
        message: "Fonts are running",
        host: ctx.host,
        time_utc: utc_now_string(),
        samples,
    })
}
