//! Trame pages: rendered markdown, images and the debug listing.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
};
use markdown::{PieceKind, Trame, TrameBuilder};
use std::path::{Component, Path as FsPath, PathBuf};
use tracing::{debug, warn};

use crate::assets::AssetUrls;
use crate::context::PageContext;
use crate::error::{AppError, AppResult};
use crate::render::{page, render_pieces};
use crate::state::AppState;

/// What a trame path points at, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrameKind {
    Markdown,
    Image(&'static str),
}

impl TrameKind {
    pub fn from_path(path: &FsPath) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        let kind = match extension.as_str() {
            "md" | "markdown" => TrameKind::Markdown,
            "png" => TrameKind::Image("image/png"),
            "jpg" | "jpeg" => TrameKind::Image("image/jpeg"),
            "gif" => TrameKind::Image("image/gif"),
            "webp" => TrameKind::Image("image/webp"),
            "svg" => TrameKind::Image("image/svg+xml"),
            "avif" => TrameKind::Image("image/avif"),
            _ => return None,
        };
        Some(kind)
    }
}

/// Joins `requested` under `root`. Parent, root and prefix components are
/// refused so the result never leaves `root`.
pub fn resolve_trame_path(root: &FsPath, requested: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    let mut depth = 0;
    for component in FsPath::new(requested.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (depth > 0).then_some(resolved)
}

fn not_found(requested: &str) -> AppError {
    AppError::NotFound(format!("Trame not found: {requested}"))
}

/// Resolves and classifies a request, checking the file exists.
async fn locate(state: &AppState, requested: &str) -> AppResult<(PathBuf, TrameKind)> {
    let path = resolve_trame_path(state.trames_dir(), requested).ok_or_else(|| {
        warn!(requested, "Refused trame path");
        not_found(requested)
    })?;
    let kind = TrameKind::from_path(&path).ok_or_else(|| not_found(requested))?;
    if !tokio::fs::metadata(&path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
    {
        debug!(path = %path.display(), "Trame file missing");
        return Err(not_found(requested));
    }
    Ok((path, kind))
}

#[derive(Template)]
#[template(path = "trame/trame.html")]
struct TrameTemplate {
    deps: AssetUrls,
    default_theme: String,
    title: String,
    origin: String,
    pieces: Vec<String>,
}

#[derive(Template)]
#[template(path = "trame/trame_image.html")]
struct TrameImageTemplate {
    deps: AssetUrls,
    default_theme: String,
    name: String,
    src: String,
}

async fn read_trame(path: PathBuf) -> AppResult<Trame> {
    let trame = tokio::task::spawn_blocking(move || TrameBuilder::from_file(&path))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;
    Ok(trame)
}

/// Handler for `GET /trame/path/*trame_path`
pub async fn get_trame(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(trame_path): Path<String>,
) -> AppResult<Html<String>> {
    let (path, kind) = locate(&state, &trame_path).await?;
    match kind {
        TrameKind::Markdown => {
            let trame = read_trame(path).await?;
            debug!(origin = %trame.origin, pieces = trame.piece_count(), "Rendering trame");
            page(&TrameTemplate {
                deps: ctx.deps,
                default_theme: ctx.default_theme(),
                title: trame.title.clone().unwrap_or_else(|| trame_path.clone()),
                origin: trame_path,
                pieces: render_pieces(&trame.pieces)?,
            })
        }
        TrameKind::Image(_) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            page(&TrameImageTemplate {
                deps: ctx.deps,
                default_theme: ctx.default_theme(),
                name,
                src: format!("/trame/raw/{}", trame_path.trim_start_matches('/')),
            })
        }
    }
}

/// Handler for `GET /trame/raw/*trame_path`. Images only.
pub async fn get_raw(
    State(state): State<AppState>,
    Path(trame_path): Path<String>,
) -> AppResult<impl IntoResponse> {
    let (path, kind) = locate(&state, &trame_path).await?;
    let TrameKind::Image(content_type) = kind else {
        return Err(not_found(&trame_path));
    };
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

#[derive(Template)]
#[template(path = "trame/trame_debug.html")]
struct TrameDebugTemplate {
    deps: AssetUrls,
    default_theme: String,
    trame_fields: [&'static str; 3],
    piece_kinds: Vec<&'static str>,
}

/// Handler for `GET /trame/debug`
pub async fn debug_page(ctx: PageContext) -> AppResult<Html<String>> {
    page(&TrameDebugTemplate {
        deps: ctx.deps,
        default_theme: ctx.default_theme(),
        trame_fields: Trame::FIELD_NAMES,
        piece_kinds: PieceKind::ALL.iter().map(|kind| kind.as_str()).collect(),
    })
}
