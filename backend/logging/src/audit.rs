//! Admin Audit Logger
//!
//! Login, logout and refused access to the admin area, emitted as structured
//! events under the `audit` target so they land in the NDJSON log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum AuditEvent {
    LoginSucceeded { access_name: String },
    LoginFailed { access_name: String, reason: String },
    Logout { access_name: String },
    AccessDenied { access_name: String, path: String },
}

impl AuditEvent {
    pub fn access_name(&self) -> &str {
        match self {
            AuditEvent::LoginSucceeded { access_name }
            | AuditEvent::LoginFailed { access_name, .. }
            | AuditEvent::Logout { access_name }
            | AuditEvent::AccessDenied { access_name, .. } => access_name,
        }
    }

    fn is_failure(&self) -> bool {
        matches!(
            self,
            AuditEvent::LoginFailed { .. } | AuditEvent::AccessDenied { .. }
        )
    }
}

#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub event: AuditEvent,
}

impl AuditEntry {
    /// Redacts free-form fields and stamps the event.
    pub fn new(mut event: AuditEvent) -> Self {
        match &mut event {
            AuditEvent::LoginFailed { reason, .. } => {
                *reason = redact_sensitive_data(reason);
            }
            AuditEvent::AccessDenied { path, .. } => {
                *path = redact_sensitive_data(path);
            }
            AuditEvent::LoginSucceeded { .. } | AuditEvent::Logout { .. } => {}
        }
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

pub struct AuditLogger;

impl AuditLogger {
    /// Logs an admin event; failures are logged at warn level.
    pub fn log_event(event: AuditEvent) {
        let failure = event.is_failure();
        let entry = AuditEntry::new(event);
        let json = serde_json::to_string(&entry).unwrap_or_default();
        let access_name = entry.event.access_name();
        if failure {
            warn!(target: "audit", access_name, entry = %json, "Admin audit event");
        } else {
            info!(target: "audit", access_name, entry = %json, "Admin audit event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let entry = AuditEntry::new(AuditEvent::Logout {
            access_name: "znd".into(),
        });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"]["type"], "Logout");
        assert_eq!(json["event"]["access_name"], "znd");
    }

    #[test]
    fn redacts_free_form_fields() {
        let entry = AuditEntry::new(AuditEvent::AccessDenied {
            access_name: "sel".into(),
            path: "/trame/admin/sel/dashboard?password=hunter2".into(),
        });
        let AuditEvent::AccessDenied { path, .. } = &entry.event else {
            panic!("variant changed");
        };
        assert!(!path.contains("hunter2"));
    }

    #[test]
    fn failure_events() {
        assert!(AuditEvent::LoginFailed {
            access_name: "znd".into(),
            reason: "Invalid password".into()
        }
        .is_failure());
        assert!(!AuditEvent::LoginSucceeded {
            access_name: "znd".into()
        }
        .is_failure());
    }
}
