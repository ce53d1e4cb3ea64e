//! Health endpoint.

use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::context::PageContext;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub message: String,
    pub host: Option<String>,
    /// `%Y-%m-%d %H:%M:%S`, UTC.
    pub time_utc: String,
}

pub fn utc_now_string() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Handler for `GET /health`
pub async fn get_health(ctx: PageContext) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".into(),
        message: "App is running".into(),
        host: (!ctx.host.is_empty()).then_some(ctx.host),
        time_utc: utc_now_string(),
    })
}
