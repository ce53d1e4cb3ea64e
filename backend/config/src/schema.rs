//! Attam runtime configuration schema.
//!
//! Typed for serde YAML/JSON. Every section has defaults, so an empty file
//! (or no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::defaults;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttamConfig {
    /// Deployment environment; `LOCAL` enables development conveniences.
    #[serde(default = "defaults::env")]
    pub env: String,

    /// Domain key forced for every request when running locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_domain: Option<String>,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Brands served by this instance, keyed by domain key.
    #[serde(default)]
    pub domains: BTreeMap<String, DomainConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AttamConfig {
    fn default() -> Self {
        Self {
            env: defaults::env(),
            local_domain: None,
            server: ServerConfig::default(),
            paths: PathsConfig::default(),
            auth: AuthConfig::default(),
            domains: BTreeMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AttamConfig {
    pub fn is_local(&self) -> bool {
        self.env.eq_ignore_ascii_case(defaults::DEFAULT_ENV)
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default = "defaults::bind")]
    pub bind: String,
    #[serde(default = "defaults::port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: defaults::bind(),
            port: defaults::port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathsConfig {
    /// Root that `/trame/path/...` is resolved against.
    #[serde(default = "defaults::trames_dir")]
    pub trames_dir: PathBuf,
    /// Served under `/static`.
    #[serde(default = "defaults::static_dir")]
    pub static_dir: PathBuf,
    /// Front-end dependencies copied into `<static_dir>/dependencies` at startup.
    #[serde(default = "defaults::dependencies_dir")]
    pub dependencies_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            trames_dir: defaults::trames_dir(),
            static_dir: defaults::static_dir(),
            dependencies_dir: defaults::dependencies_dir(),
        }
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    /// HS256 signing secret for admin tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwt_secret: Option<String>,
    #[serde(default = "defaults::token_expire_hours")]
    pub token_expire_hours: u64,
    /// Adds `Secure` to the session cookie (HTTPS deployments).
    #[serde(default)]
    pub cookie_secure: bool,
    /// Admin accesses keyed by access name (the URL slug).
    #[serde(default)]
    pub admins: BTreeMap<String, AdminAccess>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_expire_hours: defaults::token_expire_hours(),
            cookie_secure: false,
            admins: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccess {
    pub display_name: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Domains
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DomainConfig {
    pub name: String,
    /// Host fragments this brand answers to; `*` matches any host.
    #[serde(default)]
    pub hosts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Default theme declared by this brand's pages.
    #[serde(default = "defaults::theme")]
    pub theme: String,
    /// Defaults to the domain key.
    #[serde(default)]
    pub slug: String,
}

impl DomainConfig {
    pub fn matches_host(&self, host: &str) -> bool {
        self.hosts
            .iter()
            .any(|h| h == "*" || (!h.is_empty() && host.contains(h.as_str())))
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "defaults::log_level")]
    pub level: String,
    /// Directory of the rolling NDJSON log files.
    #[serde(default = "defaults::log_dir")]
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            dir: defaults::log_dir(),
        }
    }
}
