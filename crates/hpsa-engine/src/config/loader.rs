use super::schema::HpsaConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./hpsa.yaml
    /// 2. ~/.hpsa/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<HpsaConfig, ConfigError> {
        let local_config = PathBuf::from("./hpsa.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".hpsa").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Ok(HpsaConfig::default())
    }

    pub async fn load_from(path: &Path) -> Result<HpsaConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An empty document yields the defaults.
    pub fn parse(content: &str) -> Result<HpsaConfig, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(HpsaConfig::default());
        }
        serde_yaml::from_str(content)
    }
}
