//! Shared application state.

use anyhow::{bail, Result};
use attam_config::{AdminAccess, AttamConfig};
use std::path::Path;
use std::sync::Arc;

use crate::domain::{resolve_domain, ResolvedDomain};

/// Application state shared across routes.
#[derive(Clone)]
pub struct AppState {
    config: Arc<AttamConfig>,
    jwt_secret: Arc<str>,
}

impl AppState {
    /// Fails when the config carries no signing secret.
    pub fn new(config: AttamConfig) -> Result<Self> {
        let jwt_secret = match config.auth.jwt_secret.as_deref() {
            Some(secret) if !secret.is_empty() => Arc::from(secret),
            _ => bail!("auth.jwtSecret is not set"),
        };
        Ok(Self {
            config: Arc::new(config),
            jwt_secret,
        })
    }

    pub fn config(&self) -> &AttamConfig {
        &self.config
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn trames_dir(&self) -> &Path {
        &self.config.paths.trames_dir
    }

    pub fn admin(&self, access_name: &str) -> Option<&AdminAccess> {
        self.config.auth.admins.get(access_name)
    }

    pub fn domain_for_host(&self, host: &str) -> ResolvedDomain {
        resolve_domain(&self.config, host)
    }
}
