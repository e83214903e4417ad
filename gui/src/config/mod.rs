// GUI configuration, mirroring assets/config/default.json
pub mod theme;

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::GridError;

/// Environment variable naming a JSON file that replaces the embedded defaults.
pub const CONFIG_PATH_ENV: &str = "STUDIO_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    pub engine: EngineConnSettings,
    pub grid: GridSettings,
    pub user: UserSettings,
    #[serde(default)]
    pub downloads: DownloadSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub title: String,
    pub theme: String, // "dark" or "light"
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EngineConnSettings {
    pub host: String,
    pub port: u16,
}

impl EngineConnSettings {
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GridSettings {
    pub schema: String,
    pub table: String,
    pub rows_per_page: u32,
    pub editable: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UserSettings {
    /// "owner", "admin", "developer" or "read_only"
    pub role: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DownloadSettings {
    /// Falls back to the platform download directory when unset.
    pub directory: Option<PathBuf>,
}

impl AppConfig {
    pub fn load_default() -> Result<Self, GridError> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json_str(config_str)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, GridError> {
        let config: AppConfig = serde_json::from_str(raw).map_err(|e| GridError::Config(e.to_string()))?;
        if config.grid.rows_per_page == 0 {
            return Err(GridError::Config("grid.rows_per_page must be positive".to_string()));
        }
        Ok(config)
    }

    /// The file named by `STUDIO_CONFIG` if set, the embedded defaults otherwise.
    pub fn load() -> Result<Self, GridError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                tracing::info!(path = %path, "Loading configuration from {}", CONFIG_PATH_ENV);
                let raw = std::fs::read_to_string(&path)?;
                Self::from_json_str(&raw)
            }
            Err(_) => Self::load_default(),
        }
    }
}
