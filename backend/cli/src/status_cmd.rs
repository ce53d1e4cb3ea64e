//! `attam status`: asks a running server for its health report.

use anyhow::Result;

pub fn health_url(port: u16) -> String {
    format!("http://localhost:{port}/health")
}

pub async fn run(port: Option<u16>) -> Result<()> {
    let port = match port {
        Some(port) => port,
        None => {
            attam_config::load_and_prepare(&attam_config::config_file_path())
                .await
                .map(|config| config.server.port)
                .unwrap_or(attam_config::defaults::DEFAULT_PORT)
        }
    };

    let client = reqwest::Client::new();
    match client.get(health_url(port)).send().await {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            println!("Attam is not running on port {port}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_targets_health() {
        assert_eq!(health_url(8000), "http://localhost:8000/health");
    }
}
