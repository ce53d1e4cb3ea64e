//! Config file location and loading.

use crate::schema::AttamConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Config file used when `ATTAM_CONFIG` is not set.
const CONFIG_FILE_NAME: &str = "attam.yaml";

/// Resolve the config file path.
/// Priority: `ATTAM_CONFIG` env > `./attam.yaml`
pub fn config_file_path() -> PathBuf {
    match std::env::var("ATTAM_CONFIG") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(CONFIG_FILE_NAME),
    }
}

/// Read the raw YAML document as a JSON value.
///
/// A missing file yields an empty object, so every section falls back to its
/// defaults.
pub async fn load_raw(path: &Path) -> Result<serde_json::Value> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(serde_json::Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    if raw.trim().is_empty() {
        return Ok(serde_json::Value::Object(Default::default()));
    }

    let value: serde_json::Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;
    // A document holding only comments parses as null.
    Ok(if value.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        value
    })
}

/// Load and parse the config from disk without env processing.
pub async fn load_config(path: &Path) -> Result<AttamConfig> {
    let value = load_raw(path).await?;
    serde_json::from_value(value)
        .with_context(|| format!("Invalid config at: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.yaml")).await.unwrap();
        assert_eq!(config.server.port, crate::defaults::DEFAULT_PORT);
    }

    #[tokio::test]
    async fn empty_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attam.yaml");
        std::fs::write(&path, "").unwrap();
        let config = load_config(&path).await.unwrap();
        assert!(config.is_local());
    }

    #[tokio::test]
    async fn reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attam.yaml");
        std::fs::write(&path, "server:\n  port: 9000\npaths:\n  tramesDir: /srv/trames\n").unwrap();
        let config = load_config(&path).await.unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.paths.trames_dir, PathBuf::from("/srv/trames"));
    }

    #[tokio::test]
    async fn malformed_yaml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attam.yaml");
        std::fs::write(&path, "server: [unclosed").unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(format!("{err:#}").contains("attam.yaml"));
    }
}
