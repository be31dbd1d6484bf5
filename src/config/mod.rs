use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub curio: Option<CurioConfig>,

    #[serde(flatten)]
    pub widgets: HashMap<String, toml::Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurioConfig {
    pub widgets: Vec<String>,

    /// Host tick interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_tick_ms() -> u64 {
    50
}

impl Config {
    pub async fn load(path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(path);
        info!("📄 Reading config from: {}", expanded_path);

        let content =
            fs::read_to_string(expanded_path.as_ref())
                .await
                .map_err(|source| ConfigError::Read {
                    path: expanded_path.to_string(),
                    source,
                })?;

        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;

        debug!("📋 Config loaded: {} widgets", config.get_widgets().len());

        match &config.curio {
            Some(_) => info!("📋 Found [curio] configuration"),
            None => info!("📋 No [curio] section found, using defaults"),
        }

        Ok(config)
    }

    /// Widget list from the [curio] section, or every widget when absent.
    pub fn get_widgets(&self) -> Vec<String> {
        match &self.curio {
            Some(curio) => curio.widgets.clone(),
            None => vec![
                "radial_clock".to_string(),
                "slide_puzzle".to_string(),
                "spinner".to_string(),
            ],
        }
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.curio
            .as_ref()
            .map(|c| c.tick_ms)
            .unwrap_or_else(default_tick_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            curio: None,
            widgets: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [curio]
            widgets = ["radial_clock", "spinner"]
            tick_ms = 20

            [radial_clock]
            units = ["seconds", "minutes"]

            [spinner]
            radius = 200
            "#,
        )
        .unwrap();

        assert_eq!(config.get_widgets(), vec!["radial_clock", "spinner"]);
        assert_eq!(config.tick_interval_ms(), 20);
        assert!(config.widgets.contains_key("radial_clock"));
        assert!(config.widgets.contains_key("spinner"));
    }

    #[test]
    fn test_missing_section_defaults_to_all_widgets() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.get_widgets().len(), 3);
        assert_eq!(config.tick_interval_ms(), 50);
    }
}
