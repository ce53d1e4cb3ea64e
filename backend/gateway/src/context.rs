//! Per-request page context: host, brand and dependency URLs.

use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};
use std::convert::Infallible;

use crate::assets::{AssetSource, AssetUrls};
use crate::domain::ResolvedDomain;
use crate::state::AppState;

pub struct PageContext {
    /// Raw `Host` header, empty when absent.
    pub host: String,
    pub domain: ResolvedDomain,
    pub deps: AssetUrls,
}

impl PageContext {
    pub fn with_source(mut self, source: AssetSource) -> Self {
        self.deps = source.urls();
        self
    }

    pub fn default_theme(&self) -> String {
        self.domain.default_theme().to_string()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for PageContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let domain = state.domain_for_host(&host);
        Ok(PageContext {
            host,
            domain,
            deps: AssetSource::Local.urls(),
        })
    }
}
