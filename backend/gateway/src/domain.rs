//! Brand resolution from the request `Host`.

use attam_config::{AttamConfig, DomainConfig};
use attam_theme::FALLBACK_THEME;

/// The brand a request is served as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDomain {
    pub key: Option<String>,
    pub config: Option<DomainConfig>,
}

impl ResolvedDomain {
    /// Theme the page declares as its default (`data-default-theme`).
    pub fn default_theme(&self) -> &str {
        self.config
            .as_ref()
            .map(|d| d.theme.as_str())
            .unwrap_or(FALLBACK_THEME)
    }

    pub fn name(&self) -> &str {
        self.config.as_ref().map(|d| d.name.as_str()).unwrap_or("Attam")
    }

    pub fn logo(&self) -> Option<&str> {
        self.config.as_ref().and_then(|d| d.logo.as_deref())
    }
}

/// In LOCAL, `local_domain` wins; otherwise the first domain (in key order)
/// with a host fragment contained in `host`.
pub fn resolve_domain(config: &AttamConfig, host: &str) -> ResolvedDomain {
    if config.is_local() {
        if let Some((key, domain)) = config
            .local_domain
            .as_deref()
            .and_then(|key| config.domains.get_key_value(key))
        {
            return ResolvedDomain {
                key: Some(key.clone()),
                config: Some(domain.clone()),
            };
        }
    }

    config
        .domains
        .iter()
        .find(|(_, domain)| domain.matches_host(host))
        .map(|(key, domain)| ResolvedDomain {
            key: Some(key.clone()),
            config: Some(domain.clone()),
        })
        .unwrap_or(ResolvedDomain {
            key: None,
            config: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use attam_config::apply_all_defaults;

    fn config() -> AttamConfig {
        apply_all_defaults(AttamConfig::default())
    }

    #[test]
    fn matches_by_host_fragment() {
        let resolved = resolve_domain(&config(), "www.pot-au-noir.fr:443");
        assert_eq!(resolved.key.as_deref(), Some("potaunoir"));
        assert_eq!(resolved.default_theme(), "pan-light");

        let resolved = resolve_domain(&config(), "allthingstoallmen.org");
        assert_eq!(resolved.key.as_deref(), Some("attam"));
        assert_eq!(resolved.default_theme(), "anchor");
    }

    #[test]
    fn unknown_host_uses_fallback_theme() {
        let resolved = resolve_domain(&config(), "example.com");
        assert!(resolved.key.is_none());
        assert_eq!(resolved.default_theme(), FALLBACK_THEME);
        assert_eq!(resolved.name(), "Attam");
    }

    #[test]
    fn local_override() {
        let mut cfg = config();
        cfg.local_domain = Some("attam".into());
        let resolved = resolve_domain(&cfg, "localhost:8000");
        assert_eq!(resolved.key.as_deref(), Some("attam"));

        cfg.env = "PRODUCTION".into();
        let resolved = resolve_domain(&cfg, "localhost:8000");
        assert_eq!(resolved.key.as_deref(), Some("potaunoir"));
    }
}
