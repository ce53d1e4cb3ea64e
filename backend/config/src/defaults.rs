//! Config defaults: serde default values and post-load default application.

use rand::RngCore;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

use crate::schema::{AttamConfig, DomainConfig};

/// Environment name that enables local development behavior.
pub const DEFAULT_ENV: &str = "LOCAL";

pub const DEFAULT_BIND: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 8000;

/// Admin session lifetime.
pub const DEFAULT_TOKEN_EXPIRE_HOURS: u64 = 48;

/// Theme declared by pages of brands that do not choose one.
pub const DEFAULT_THEME: &str = attam_theme::FALLBACK_THEME;

pub fn env() -> String {
    DEFAULT_ENV.to_string()
}

pub fn bind() -> String {
    DEFAULT_BIND.to_string()
}

pub fn port() -> u16 {
    DEFAULT_PORT
}

pub fn trames_dir() -> PathBuf {
    PathBuf::from("trames")
}

pub fn static_dir() -> PathBuf {
    PathBuf::from("static")
}

pub fn dependencies_dir() -> PathBuf {
    PathBuf::from("dependencies")
}

pub fn token_expire_hours() -> u64 {
    DEFAULT_TOKEN_EXPIRE_HOURS
}

pub fn theme() -> String {
    DEFAULT_THEME.to_string()
}

pub fn log_level() -> String {
    "info".to_string()
}

pub fn log_dir() -> PathBuf {
    PathBuf::from("logs")
}

/// Brands shipped with the application.
pub fn builtin_domains() -> BTreeMap<String, DomainConfig> {
    let mut domains = BTreeMap::new();
    domains.insert(
        "potaunoir".to_string(),
        DomainConfig {
            name: "Pot au Noir".to_string(),
            hosts: ["pot-au-noir.fr", "pot-au-noir.com", "localhost", "127.0.0.1"]
                .map(String::from)
                .to_vec(),
            logo: Some("/static/trames/potaunoir/logo-1.png".to_string()),
            theme: "pan-light".to_string(),
            slug: "pot-au-noir".to_string(),
        },
    );
    domains.insert(
        "attam".to_string(),
        DomainConfig {
            name: "All Things to All Men".to_string(),
            hosts: ["allthingstoallmen.org", "attam0.osc-fr1.scalingo.io"]
                .map(String::from)
                .to_vec(),
            logo: None,
            theme: DEFAULT_THEME.to_string(),
            slug: "attam".to_string(),
        },
    );
    domains
}

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: AttamConfig) -> AttamConfig {
    let config = apply_domain_defaults(config);
    apply_auth_defaults(config)
}

/// Built-in brands when none are configured; slugs default to the domain key.
fn apply_domain_defaults(mut config: AttamConfig) -> AttamConfig {
    if config.domains.is_empty() {
        config.domains = builtin_domains();
    }
    for (key, domain) in config.domains.iter_mut() {
        if domain.slug.trim().is_empty() {
            domain.slug = key.clone();
        }
    }
    config
}

/// Local runs get a throwaway signing secret; tokens die with the process.
fn apply_auth_defaults(mut config: AttamConfig) -> AttamConfig {
    let missing = config
        .auth
        .jwt_secret
        .as_deref()
        .map(str::is_empty)
        .unwrap_or(true);
    if missing && config.is_local() {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        config.auth.jwt_secret = Some(hex::encode(bytes));
        warn!("No auth.jwtSecret configured; generated an ephemeral secret for this LOCAL run");
    }
    config
}
