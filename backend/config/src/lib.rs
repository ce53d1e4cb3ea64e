//! `attam-config` — runtime configuration for the Attam server.
//!
//! Provides:
//! - Typed config schema (server, paths, auth, domains, logging)
//! - YAML loading with `${ENV_VAR}` substitution and `ATTAM_*` overrides
//! - Default application (built-in brands, LOCAL signing secret)
//! - Validation and redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_file_path, load_config, load_raw};
pub use redact::{collect_redacted_paths, redact};
pub use schema::{AdminAccess, AttamConfig, AuthConfig, DomainConfig, LoggingConfig, PathsConfig, ServerConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load, substitute env vars, override, default and validate a config file.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<AttamConfig> {
    prepare_with(io::load_raw(path).await?, &env::process_env())
}

/// Run the processing pipeline on an already-parsed document.
pub fn prepare_with(raw: serde_json::Value, env: &HashMap<String, String>) -> Result<AttamConfig> {
    let value = resolve_env_vars_with(&raw, env).context("Failed to resolve env vars in config")?;

    let config: AttamConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(config, env);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if let Some(first) = report.errors.into_iter().next() {
        bail!(first);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn production_pipeline() {
        let raw = json!({
            "env": "PRODUCTION",
            "auth": { "jwtSecret": "${SECRET}" }
        });
        let config = prepare_with(
            raw,
            &env(&[("SECRET", "0123456789abcdef0123456789abcdef"), ("SEL_PASSWORD", "pw")]),
        )
        .unwrap();
        assert!(!config.is_local());
        assert_eq!(config.auth.admins["sel"].display_name, "Sel");
        assert_eq!(config.domains.len(), 2);
    }

    #[test]
    fn production_without_secret_fails() {
        let err = prepare_with(json!({ "env": "PRODUCTION" }), &HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("auth.jwtSecret"));
    }

    #[test]
    fn env_override_wins_over_file() {
        let config = prepare_with(
            json!({ "server": { "port": 8080 } }),
            &env(&[("ATTAM_PORT", "9090")]),
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attam.yaml");
        std::fs::write(&path, "localDomain: attam\n").unwrap();
        let config = load_and_prepare(&path).await.unwrap();
        assert_eq!(config.local_domain.as_deref(), Some("attam"));
    }
}
