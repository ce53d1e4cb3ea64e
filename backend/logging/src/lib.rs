//! Telemetry and structured logging components for Attam.
//!
//! Handles log redaction, JSON output generation, file rotation, and admin audit logging.

pub mod audit;
pub mod logger;
pub mod redact;

pub use audit::{AuditEntry, AuditEvent, AuditLogger};
pub use logger::{init_console_logger, init_logger};
pub use redact::redact_sensitive_data;
