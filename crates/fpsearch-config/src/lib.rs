// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/v1".to_string(),
            api_key: None,
            timeout_secs: 30,
            poll_interval_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub telemetry: TelemetryConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: FPSEARCH_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("FPSEARCH_").split("__"));

    let config: AppConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = load(None).expect("defaults load");
            assert_eq!(config.service.base_url, "http://127.0.0.1:8080/v1");
            assert!(config.service.api_key.is_none());
            assert_eq!(config.service.timeout(), Duration::from_secs(30));
            assert_eq!(config.service.poll_interval(), Duration::from_millis(500));
            assert_eq!(config.telemetry.log_level, "info");
            Ok(())
        });
    }

    #[test]
    fn test_toml_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "fpsearch.toml",
                r#"
                [service]
                base_url = "https://search.example.com/v1"
                api_key = "from-file"
                poll_interval_ms = 250
                "#,
            )?;
            jail.set_env("FPSEARCH_SERVICE__API_KEY", "from-env");
            jail.set_env("FPSEARCH_TELEMETRY__LOG_LEVEL", "debug");

            let config = load(Some(Path::new("fpsearch.toml"))).expect("layered load");
            assert_eq!(config.service.base_url, "https://search.example.com/v1");
            assert_eq!(config.service.api_key.as_deref(), Some("from-env"));
            assert_eq!(config.service.poll_interval_ms, 250);
            assert_eq!(config.service.timeout_secs, 30);
            assert_eq!(config.telemetry.log_level, "debug");
            Ok(())
        });
    }
}
