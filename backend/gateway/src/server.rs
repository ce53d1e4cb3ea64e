//! Main HTTP server: router assembly and listener.

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, instrument};

use crate::state::AppState;
use crate::{admin, health, pages, trame};

/// All routes, with `/static` served from `paths.static_dir`.
pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config().paths.static_dir);

    Router::new()
        .route("/", get(pages::landing))
        .route("/routes", get(pages::routes))
        .route("/template", get(pages::template_showcase))
        .route("/fonts", get(pages::fonts))
        .route("/health", get(health::get_health))
        // Trames
        .route("/trame/path/*trame_path", get(trame::get_trame))
        .route("/trame/raw/*trame_path", get(trame::get_raw))
        .route("/trame/debug", get(trame::debug_page))
        // Admin; the static login route takes priority over the access name
        .route("/trame/admin/login", post(admin::login_submit))
        .route("/trame/admin/:access_name", get(admin::login_page))
        .route("/trame/admin/:access_name/dashboard", get(admin::dashboard))
        .route("/trame/admin/:access_name/logout", get(admin::logout))
        .nest_service("/static", static_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Attam HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Attam HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
