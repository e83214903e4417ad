// Engine settings: defaults, overridable from the environment
use serde::Deserialize;
use std::env;

use crate::error::EngineError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Rows per message on the FetchAllRows stream.
    pub fetch_chunk_size: usize,
    pub seed: Option<SeedSettings>,
}

/// A CSV file loaded into the store at startup.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SeedSettings {
    pub csv_path: String,
    pub schema: String,
    pub table: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 50051,
            fetch_chunk_size: 1000,
            seed: None,
        }
    }
}

impl EngineSettings {
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(host) = lookup("TABLE_ENGINE_HOST") {
            settings.host = host;
        }
        if let Some(port) = lookup("TABLE_ENGINE_PORT") {
            settings.port = port
                .parse()
                .map_err(|e| EngineError::ConfigError(format!("TABLE_ENGINE_PORT '{}': {}", port, e)))?;
        }
        if let Some(chunk) = lookup("TABLE_ENGINE_FETCH_CHUNK") {
            settings.fetch_chunk_size = chunk
                .parse()
                .map_err(|e| EngineError::ConfigError(format!("TABLE_ENGINE_FETCH_CHUNK '{}': {}", chunk, e)))?;
            if settings.fetch_chunk_size == 0 {
                return Err(EngineError::ConfigError("TABLE_ENGINE_FETCH_CHUNK must be positive".to_string()));
            }
        }
        if let Some(csv_path) = lookup("TABLE_ENGINE_SEED_CSV") {
            settings.seed = Some(SeedSettings {
                csv_path,
                schema: lookup("TABLE_ENGINE_SEED_SCHEMA").unwrap_or_else(|| "public".to_string()),
                table: lookup("TABLE_ENGINE_SEED_TABLE").unwrap_or_else(|| "rows".to_string()),
            });
        }

        Ok(settings)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let settings = EngineSettings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert_eq!(settings.listen_addr(), "127.0.0.1:50051");
    }

    #[test]
    fn test_overrides_and_seed() {
        let settings = EngineSettings::from_lookup(lookup_from(&[
            ("TABLE_ENGINE_PORT", "6000"),
            ("TABLE_ENGINE_SEED_CSV", "data/users.csv"),
            ("TABLE_ENGINE_SEED_TABLE", "users"),
        ]))
        .unwrap();
        assert_eq!(settings.port, 6000);
        let seed = settings.seed.unwrap();
        assert_eq!(seed.schema, "public");
        assert_eq!(seed.table, "users");
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let result = EngineSettings::from_lookup(lookup_from(&[("TABLE_ENGINE_PORT", "abc")]));
        assert!(matches!(result, Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_zero_chunk_rejected() {
        let result = EngineSettings::from_lookup(lookup_from(&[("TABLE_ENGINE_FETCH_CHUNK", "0")]));
        assert!(result.is_err());
    }
}
