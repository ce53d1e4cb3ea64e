//! Config validation: checks with path-qualified, user-facing messages.

use crate::schema::AttamConfig;
use attam_theme::Theme;
use thiserror::Error;

/// Secrets shorter than this are accepted with a warning.
const MIN_SECRET_LEN: usize = 32;
/// One year.
pub const MAX_TOKEN_EXPIRE_HOURS: u64 = 8760;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &AttamConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_auth(config, &mut report);
    validate_domains(config, &mut report);
    report
}

fn validate_server(config: &AttamConfig, report: &mut ValidationReport) {
    if config.server.port == 0 {
        report.error("server.port", "Port must be between 1 and 65535");
    }
    if config.server.bind.trim().is_empty() {
        report.error("server.bind", "Bind address cannot be empty");
    }
}

fn validate_auth(config: &AttamConfig, report: &mut ValidationReport) {
    let auth = &config.auth;
    if auth.token_expire_hours == 0 {
        report.error("auth.tokenExpireHours", "Token lifetime must be at least one hour");
    } else if auth.token_expire_hours > MAX_TOKEN_EXPIRE_HOURS {
        report.error(
            "auth.tokenExpireHours",
            format!("Token lifetime cannot exceed {MAX_TOKEN_EXPIRE_HOURS} hours"),
        );
    }

    match auth.jwt_secret.as_deref() {
        None | Some("") if !config.is_local() => {
            report.error(
                "auth.jwtSecret",
                "A signing secret is required outside LOCAL (set ATTAM_JWT_SECRET)",
            );
        }
        Some(secret) if !secret.is_empty() && secret.len() < MIN_SECRET_LEN => {
            report.warn(
                "auth.jwtSecret",
                format!("Secret is shorter than {MIN_SECRET_LEN} characters"),
            );
        }
        _ => {}
    }

    for (name, access) in &auth.admins {
        let path = format!("auth.admins.{name}");
        let valid_slug = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_slug {
            report.error(&path, "Access name must be URL-safe (letters, digits, '-', '_')");
        }
        if access.password.is_empty() {
            report.error(format!("{path}.password"), "Password cannot be empty");
        }
        if access.display_name.trim().is_empty() {
            report.warn(format!("{path}.displayName"), "Display name is empty");
        }
    }
}

fn validate_domains(config: &AttamConfig, report: &mut ValidationReport) {
    for (key, domain) in &config.domains {
        let path = format!("domains.{key}");
        if domain.hosts.is_empty() {
            report.warn(format!("{path}.hosts"), "Domain has no hosts and is only reachable as localDomain");
        }
        if let Err(e) = Theme::new(&domain.theme) {
            report.error(format!("{path}.theme"), e.to_string());
        }
    }

    if let Some(local) = &config.local_domain {
        if !config.domains.contains_key(local) {
            report.warn(
                "localDomain",
                format!("Unknown domain '{local}'; host matching will be used"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::apply_all_defaults;
    use crate::schema::AdminAccess;

    fn local() -> AttamConfig {
        apply_all_defaults(AttamConfig::default())
    }

    #[test]
    fn defaults_are_valid() {
        let report = validate(&local());
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn production_requires_secret() {
        let cfg = AttamConfig {
            env: "PRODUCTION".into(),
            ..Default::default()
        };
        let report = validate(&apply_all_defaults(cfg));
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "auth.jwtSecret");
    }

    #[test]
    fn short_secret_warns() {
        let mut cfg = local();
        cfg.auth.jwt_secret = Some("short".into());
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn bad_admins() {
        let mut cfg = local();
        cfg.auth.admins.insert(
            "z/nd".into(),
            AdminAccess {
                display_name: "Znd".into(),
                password: String::new(),
            },
        );
        let report = validate(&cfg);
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["auth.admins.z/nd", "auth.admins.z/nd.password"]);
    }

    #[test]
    fn invalid_theme_and_zero_values() {
        let mut cfg = local();
        cfg.server.port = 0;
        cfg.auth.token_expire_hours = 0;
        if let Some(domain) = cfg.domains.get_mut("attam") {
            domain.theme = "night; color: red".into();
        }
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 3);
    }

    #[test]
    fn token_lifetime_upper_bound() {
        let mut cfg = local();
        cfg.auth.token_expire_hours = MAX_TOKEN_EXPIRE_HOURS;
        assert!(validate(&cfg).is_valid());

        cfg.auth.token_expire_hours = 10_000_000_000_000;
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "auth.tokenExpireHours");
    }

    #[test]
    fn unknown_local_domain_warns() {
        let mut cfg = local();
        cfg.local_domain = Some("nowhere".into());
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "localDomain");
    }
}
