//! Environment handling for config values.
//!
//! - `${VAR_NAME}` in any string value is replaced at load time. Only
//!   uppercase `[A-Z_][A-Z0-9_]*` names are matched; `$${VAR}` stays literal
//!   as `${VAR}`.
//! - A handful of `ATTAM_*` variables override file values directly.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::schema::{AdminAccess, AttamConfig};

/// `$${VAR}` (escaped) or `${VAR}`.
static REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Admin accesses created from the environment when the file defines none.
const ENV_ADMINS: [(&str, &str, &str); 2] = [
    ("znd", "Znd", "ZND_PASSWORD"),
    ("sel", "Sel", "SEL_PASSWORD"),
];

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Snapshot of the process environment.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Substitute `${VAR}` references using the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &process_env())
}

/// Substitute `${VAR}` references using a provided map.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => {
            let items: Result<Vec<_>> = arr
                .iter()
                .enumerate()
                .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
                .collect();
            Ok(Value::Array(items?))
        }
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = REFERENCE_PATTERN.replace_all(s, |caps: &Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Apply `ATTAM_*` overrides and environment-provided admin passwords.
pub fn apply_env_overrides(mut config: AttamConfig, env: &HashMap<String, String>) -> AttamConfig {
    let var = |name: &str| env.get(name).filter(|v| !v.is_empty()).cloned();

    if let Some(bind) = var("ATTAM_BIND") {
        config.server.bind = bind;
    }
    if let Some(port) = var("ATTAM_PORT").and_then(|p| p.parse().ok()) {
        config.server.port = port;
    }
    if let Some(env_name) = var("ATTAM_ENV") {
        config.env = env_name;
    }
    if let Some(domain) = var("ATTAM_LOCAL_DOMAIN") {
        config.local_domain = Some(domain);
    }
    if let Some(secret) = var("ATTAM_JWT_SECRET") {
        config.auth.jwt_secret = Some(secret);
    }

    if config.auth.admins.is_empty() {
        for (slug, display_name, password_var) in ENV_ADMINS {
            if let Some(password) = var(password_var) {
                debug!(access_name = slug, "Admin access configured from environment");
                config.auth.admins.insert(
                    slug.to_string(),
                    AdminAccess {
                        display_name: display_name.to_string(),
                        password,
                    },
                );
            }
        }
    }
    config
}
