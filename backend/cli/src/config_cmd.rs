//! `attam config`: prints the effective configuration, secrets masked.

use std::path::PathBuf;

use anyhow::Result;

pub async fn run(config_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.unwrap_or_else(attam_config::config_file_path);
    let config = attam_config::load_and_prepare(&path).await?;
    let redacted = attam_config::redact(&serde_json::to_value(&config)?);

    println!("# {}", path.display());
    print!("{}", serde_yaml::to_string(&redacted)?);
    for masked in attam_config::collect_redacted_paths(&serde_json::to_value(&config)?) {
        tracing::debug!(path = %masked, "Masked config value");
    }
    Ok(())
}
